//! Classic API endpoint wrappers.
//!
//! Reads request JSON; writes take a raw XML document and pass it through.

pub mod payloads;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use reqwest::Method;
use serde_json::Value;

use crate::client::api_client::ApiClient;
use crate::dispatch::{CallArgs, Outcome, Reply};
use crate::error::{Result, SdkError};
use crate::models::classic::{
    ClassicAdvancedComputerSearch, ClassicAdvancedComputerSearchesItem, ClassicCategoriesItem, ClassicCategory,
    ClassicComputer, ClassicComputerGroup, ClassicComputersItem, ClassicPackage, ClassicPackageItem,
};
use crate::models::ApiModel;

pub const VALID_COMPUTER_SUBSETS: &[&str] = &[
    "general",
    "location",
    "purchasing",
    "peripherals",
    "hardware",
    "certificates",
    "software",
    "extensionattributes",
    "groupsaccounts",
    "configurationprofiles",
];

static RESPONSE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<id>\s*(\d+)\s*</id>").unwrap());

/// The `id` element of an XML reply to a create call.
pub fn parse_response_id(xml: &str) -> Result<i64> {
    RESPONSE_ID
        .captures(xml)
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| SdkError::validation("response does not contain an <id> element"))
}

#[derive(Debug, Clone)]
pub struct ClassicApi {
    client: ApiClient,
}

impl ClassicApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn get_json(&self, resource_path: &str) -> Result<Value> {
        self.client
            .classic_api_request(Method::GET, resource_path, None, None)
            .await?
            .json()
    }

    async fn list<T: ApiModel>(&self, resource_path: &str, key: &str) -> Result<Vec<T>> {
        let mut body = self.get_json(resource_path).await?;
        parse_list(take_key(&mut body, key))
    }

    /// POST an XML document and return the id from the reply.
    async fn create(&self, resource_path: &str, xml: &str) -> Result<i64> {
        let response = self
            .client
            .classic_api_request(Method::POST, resource_path, Some(xml), None)
            .await?;
        parse_response_id(&response.text())
    }

    async fn update(&self, resource_path: &str, xml: &str) -> Result<()> {
        self.client
            .classic_api_request(Method::PUT, resource_path, Some(xml), None)
            .await?;
        Ok(())
    }

    async fn delete(&self, resource_path: &str) -> Result<()> {
        self.client
            .classic_api_request(Method::DELETE, resource_path, None, None)
            .await?;
        Ok(())
    }

    // categories

    pub async fn list_all_categories(&self) -> Result<Vec<ClassicCategoriesItem>> {
        self.list("categories", "categories").await
    }

    pub async fn get_category_by_id(&self, category_id: i64) -> Result<ClassicCategory> {
        ClassicCategory::parse(self.get_json(&format!("categories/id/{}", category_id)).await?)
    }

    /// Create a category from an XML document, returning the new id.
    pub async fn create_category(&self, xml: &str) -> Result<i64> {
        self.create("categories/id/0", xml).await
    }

    pub async fn update_category_by_id(&self, category_id: i64, xml: &str) -> Result<()> {
        self.update(&format!("categories/id/{}", category_id), xml).await
    }

    pub async fn delete_category_by_id(&self, category_id: i64) -> Result<()> {
        self.delete(&format!("categories/id/{}", category_id)).await
    }

    // computers

    /// Every computer; the only subset accepted here is `basic`.
    pub async fn list_all_computers(&self, subsets: &[&str]) -> Result<Vec<ClassicComputersItem>> {
        let path = if subsets.is_empty() {
            "computers"
        } else if subsets.iter().all(|s| s.eq_ignore_ascii_case("basic")) {
            "computers/subset/basic"
        } else {
            return Err(SdkError::validation("invalid subset(s), must be one of: basic"));
        };
        self.list(path, "computers").await
    }

    pub async fn get_computer_by_id(&self, computer_id: i64, subsets: &[String]) -> Result<ClassicComputer> {
        let response = self
            .client
            .classic_api_request(Method::GET, &computer_path(computer_id, subsets)?, None, None)
            .await?;
        ClassicComputer::from_response(&response)
    }

    /// Fetch many computer records concurrently. An empty `computer_ids` fetches every computer.
    ///
    /// Results follow the order of `computer_ids`; failed lookups are reported or dropped
    /// according to the client's `return_exceptions` setting.
    pub async fn get_computers(
        &self,
        computer_ids: &[i64],
        subsets: &[String],
    ) -> Result<Vec<Outcome<ClassicComputer>>> {
        let ids: Vec<i64> = if computer_ids.is_empty() {
            self.list_all_computers(&[]).await?.into_iter().map(|c| c.id).collect()
        } else {
            computer_ids.to_vec()
        };
        // fail on bad subsets before spawning anything
        computer_path(0, subsets)?;

        let client = self.client.clone();
        let subsets = Arc::new(subsets.to_vec());
        let arguments = ids.into_iter().map(CallArgs::Single).collect();
        let outcomes = self
            .client
            .dispatcher()
            .dispatch_models(
                move |args: CallArgs<i64>| {
                    let client = client.clone();
                    let subsets = subsets.clone();
                    async move {
                        let id = match args {
                            CallArgs::Single(id) => id,
                            CallArgs::Named(named) => named
                                .get("computer")
                                .and_then(Value::as_i64)
                                .ok_or_else(|| SdkError::validation("missing 'computer' argument"))?,
                        };
                        let response = client
                            .classic_api_request(Method::GET, &computer_path(id, &subsets)?, None, None)
                            .await?;
                        Ok::<_, SdkError>(Reply::Raw(response))
                    }
                },
                arguments,
                None,
                None,
            )
            .await;
        Ok(outcomes)
    }

    /// Not every field of a computer record can be written.
    pub async fn update_computer_by_id(&self, computer_id: i64, xml: &str) -> Result<()> {
        self.update(&format!("computers/id/{}", computer_id), xml).await
    }

    pub async fn delete_computer_by_id(&self, computer_id: i64) -> Result<()> {
        self.delete(&format!("computers/id/{}", computer_id)).await
    }

    /// Mark a computer unmanaged. The management framework and MDM profile stay on the device.
    pub async fn set_computer_unmanaged_by_id(&self, computer_id: i64) -> Result<()> {
        self.update_computer_by_id(computer_id, &payloads::remote_management(false, "", ""))
            .await
    }

    /// Mark a computer managed. Without a password a random one is generated.
    pub async fn set_computer_managed_by_id(
        &self,
        computer_id: i64,
        management_user: &str,
        management_password: Option<&str>,
    ) -> Result<()> {
        if management_user.is_empty() {
            return Err(SdkError::validation("management user must not be empty"));
        }
        let password = match management_password {
            Some(password) if !password.is_empty() => password.to_owned(),
            _ => payloads::generate_management_password(),
        };
        self.update_computer_by_id(computer_id, &payloads::remote_management(true, management_user, &password))
            .await
    }

    // computer groups

    /// Static groups may list `computers` and no criteria; smart groups the reverse.
    pub async fn create_computer_group(&self, xml: &str) -> Result<i64> {
        self.create("computergroups/id/0", xml).await
    }

    pub async fn list_all_computer_groups(&self) -> Result<Vec<ClassicComputerGroup>> {
        self.list("computergroups", "computer_groups").await
    }

    pub async fn get_computer_group_by_id(&self, group_id: i64) -> Result<ClassicComputerGroup> {
        ClassicComputerGroup::parse(self.get_json(&format!("computergroups/id/{}", group_id)).await?)
    }

    /// Replaces the group's criteria with the ones in `xml`.
    pub async fn update_smart_computer_group_by_id(&self, group_id: i64, xml: &str) -> Result<()> {
        self.update(&format!("computergroups/id/{}", group_id), xml).await
    }

    pub async fn update_static_computer_group_membership_by_id(
        &self,
        group_id: i64,
        computers_to_add: &[i64],
        computers_to_remove: &[i64],
    ) -> Result<()> {
        if computers_to_add.is_empty() && computers_to_remove.is_empty() {
            return Err(SdkError::validation("no computers to add or remove"));
        }
        let xml = payloads::group_membership(computers_to_add, computers_to_remove);
        self.update(&format!("computergroups/id/{}", group_id), &xml).await
    }

    // advanced computer searches

    pub async fn create_advanced_computer_search(&self, xml: &str) -> Result<i64> {
        self.create("advancedcomputersearches/id/0", xml).await
    }

    pub async fn list_all_advanced_computer_searches(&self) -> Result<Vec<ClassicAdvancedComputerSearchesItem>> {
        self.list("advancedcomputersearches", "advanced_computer_searches").await
    }

    pub async fn get_advanced_computer_search_by_id(&self, search_id: i64) -> Result<ClassicAdvancedComputerSearch> {
        ClassicAdvancedComputerSearch::parse(
            self.get_json(&format!("advancedcomputersearches/id/{}", search_id)).await?,
        )
    }

    /// With `return_updated` the search is read back, results included.
    pub async fn update_advanced_computer_search_by_id(
        &self,
        search_id: i64,
        xml: &str,
        return_updated: bool,
    ) -> Result<Option<ClassicAdvancedComputerSearch>> {
        self.update(&format!("advancedcomputersearches/id/{}", search_id), xml).await?;
        if !return_updated {
            return Ok(None);
        }
        self.get_advanced_computer_search_by_id(search_id).await.map(Some)
    }

    pub async fn delete_advanced_computer_search_by_id(&self, search_id: i64) -> Result<()> {
        self.delete(&format!("advancedcomputersearches/id/{}", search_id)).await
    }

    // packages

    /// Only `name` and `filename` are required.
    pub async fn create_package(&self, xml: &str) -> Result<i64> {
        self.create("packages/id/0", xml).await
    }

    pub async fn list_all_packages(&self) -> Result<Vec<ClassicPackageItem>> {
        self.list("packages", "packages").await
    }

    pub async fn get_package_by_id(&self, package_id: i64) -> Result<ClassicPackage> {
        ClassicPackage::parse(self.get_json(&format!("packages/id/{}", package_id)).await?)
    }

    /// Also deletes the package file on a cloud distribution point.
    pub async fn delete_package_by_id(&self, package_id: i64) -> Result<()> {
        self.delete(&format!("packages/id/{}", package_id)).await
    }
}

fn computer_path(computer_id: i64, subsets: &[String]) -> Result<String> {
    if subsets.is_empty() {
        return Ok(format!("computers/id/{}", computer_id));
    }
    if let Some(bad) = subsets
        .iter()
        .find(|s| !VALID_COMPUTER_SUBSETS.contains(&s.to_lowercase().as_str()))
    {
        return Err(SdkError::validation(format!(
            "invalid subset '{}', must be one of: {}",
            bad,
            VALID_COMPUTER_SUBSETS.join(", ")
        )));
    }
    Ok(format!("computers/id/{}/subset/{}", computer_id, subsets.join("&")))
}

fn take_key(body: &mut Value, key: &str) -> Value {
    body.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

fn parse_list<T: ApiModel>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.into_iter().map(T::parse).collect(),
        Value::Null => Ok(Vec::new()),
        other => T::parse(other).map(|item| vec![item]),
    }
}
