#[cfg(test)]
mod test {

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, StatusCode};
use serde_json::Map;

use crate::client::response::ApiResponse;
use crate::dispatch::{CallArgs, Dispatcher, Outcome, Reply};
use crate::error::SdkError;
use crate::models::classic::ClassicCategory;
use crate::tests::common::json;

fn args(n: u64) -> Vec<CallArgs<u64>> {
    (0..n).map(CallArgs::Single).collect()
}

fn single(args: CallArgs<u64>) -> u64 {
    match args {
        CallArgs::Single(i) => i,
        CallArgs::Named(_) => panic!("expected a single argument"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_follow_argument_order_not_completion_order() {
    let dispatcher = Dispatcher::new(10, true);
    let outcomes = dispatcher
        .dispatch(
            |args: CallArgs<u64>| async move {
                let i = single(args);
                // later arguments finish first
                tokio::time::sleep(Duration::from_millis((10 - i) * 15)).await;
                Ok::<_, SdkError>(i * 10)
            },
            args(10),
            None,
            None,
        )
        .await;

    let values: Vec<u64> = outcomes.into_iter().map(|o| o.into_result().unwrap()).collect();
    assert_eq!(values, (0..10).map(|i| i * 10).collect::<Vec<_>>());
}

#[tokio::test]
async fn failures_keep_their_position_when_returned() {
    let dispatcher = Dispatcher::new(4, true);
    let outcomes = dispatcher
        .dispatch(
            |args: CallArgs<u64>| async move {
                let i = single(args);
                if i % 2 == 1 {
                    Err(SdkError::validation(format!("odd {}", i)))
                } else {
                    Ok(i)
                }
            },
            args(6),
            None,
            None,
        )
        .await;

    assert_eq!(outcomes.len(), 6);
    for (position, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Outcome::Success(value) => assert_eq!(*value, position as u64),
            Outcome::Failure(failure) => {
                assert_eq!(failure.index, position);
                assert!(matches!(failure.error, SdkError::Validation(_)));
            }
        }
    }
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 3);
}

#[tokio::test]
async fn failures_are_dropped_without_return_exceptions() {
    let dispatcher = Dispatcher::new(4, true);
    let outcomes = dispatcher
        .dispatch(
            |args: CallArgs<u64>| async move {
                let i = single(args);
                if i == 2 { Err(SdkError::validation("boom")) } else { Ok(i) }
            },
            args(5),
            None,
            Some(false),
        )
        .await;

    let values: Vec<u64> = outcomes.into_iter().filter_map(Outcome::success).collect();
    assert_eq!(values, vec![0, 1, 3, 4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_calls_never_exceed_ceiling() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let dispatcher = Dispatcher::new(3, true);
    let (in_flight_c, peak_c) = (in_flight.clone(), peak.clone());
    let outcomes = dispatcher
        .dispatch(
            move |_args: CallArgs<u64>| {
                let in_flight = in_flight_c.clone();
                let peak = peak_c.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, SdkError>(())
                }
            },
            args(12),
            Some(10),
            None,
        )
        .await;

    assert_eq!(outcomes.len(), 12);
    assert!(peak.load(Ordering::SeqCst) <= 3, "peak {} exceeded ceiling", peak.load(Ordering::SeqCst));
    assert!(peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn named_arguments_reach_the_handler() {
    let dispatcher = Dispatcher::new(2, true);
    let named: Vec<CallArgs<u64>> = (0..3)
        .map(|i| {
            let mut map = Map::new();
            map.insert("page".into(), json!(i));
            CallArgs::Named(map)
        })
        .collect();

    let outcomes = dispatcher
        .dispatch(
            |args: CallArgs<u64>| async move {
                match args {
                    CallArgs::Named(map) => Ok(map["page"].as_u64().unwrap_or_default()),
                    CallArgs::Single(_) => Err(SdkError::validation("expected named")),
                }
            },
            named,
            None,
            None,
        )
        .await;

    let pages: Vec<u64> = outcomes.into_iter().filter_map(Outcome::success).collect();
    assert_eq!(pages, vec![0, 1, 2]);
}

#[tokio::test]
async fn panicking_call_becomes_dispatch_failure() {
    let dispatcher = Dispatcher::new(2, true);
    let outcomes = dispatcher
        .dispatch(
            |args: CallArgs<u64>| async move {
                let i = single(args);
                if i == 1 {
                    panic!("handler blew up");
                }
                Ok::<_, SdkError>(i)
            },
            args(3),
            None,
            None,
        )
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(matches!(&outcomes[1], Outcome::Failure(f) if matches!(f.error, SdkError::Dispatch(_))));
    assert!(outcomes[2].is_success());
}

#[tokio::test]
async fn raw_responses_are_parsed_into_models() {
    let dispatcher = Dispatcher::new(2, true);
    let outcomes = dispatcher
        .dispatch_models(
            |args: CallArgs<u64>| async move {
                let id = single(args);
                if id == 0 {
                    let model = ClassicCategory { id: Some(0), name: Some("prebuilt".into()), priority: None };
                    return Ok::<_, SdkError>(Reply::Model(model));
                }
                let body = json!({"category": {"id": id, "name": format!("cat-{}", id), "priority": 9}});
                Ok(Reply::Raw(ApiResponse::new(
                    StatusCode::OK,
                    HeaderMap::new(),
                    format!("http://localhost/JSSResource/categories/id/{}", id),
                    body.to_string().into_bytes(),
                )))
            },
            args(3),
            None,
            None,
        )
        .await;

    let categories: Vec<ClassicCategory> = outcomes.into_iter().map(|o| o.into_result().unwrap()).collect();
    assert_eq!(categories[0].name.as_deref(), Some("prebuilt"));
    assert_eq!(categories[2].name.as_deref(), Some("cat-2"));
    assert_eq!(categories[2].priority, Some(9));
}

}
