use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::ApiModel;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    pub id: Option<String>,
    pub udid: Option<String>,
    pub general: Option<ComputerGeneral>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputerGeneral {
    pub name: Option<String>,
    pub last_ip_address: Option<String>,
    pub asset_tag: Option<String>,
    pub platform: Option<String>,
    pub supervised: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for Computer {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobileDevice {
    pub mobile_device_id: Option<String>,
    pub device_type: Option<String>,
    pub general: Option<MobileDeviceGeneral>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobileDeviceGeneral {
    pub udid: Option<String>,
    pub display_name: Option<String>,
    pub asset_tag: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for MobileDevice {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Option<String>,
    pub package_name: String,
    pub file_name: String,
    pub category_id: Option<String>,
    pub priority: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for Package {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MdmCommandClient {
    pub management_id: String,
    pub client_type: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MdmCommandStatus {
    pub uuid: String,
    pub client: MdmCommandClient,
    pub command_state: String,
    pub command_type: String,
    pub date_sent: Option<String>,
    pub date_completed: Option<String>,
    pub profile_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for MdmCommandStatus {}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SendMdmCommandResponse {
    pub id: String,
    pub href: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiModel for SendMdmCommandResponse {}

/// Profile renewal reply, flattened from `udidsNotProcessed.udids`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenewMdmProfileResponse {
    pub udids_not_processed: Vec<String>,
}

/// MDM command sent through the command preview endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum MdmCommand {
    EnableLostMode(EnableLostModeCommand),
    EraseDevice(EraseDeviceCommand),
    LogOutUser,
    RestartDevice(RestartDeviceCommand),
    SetRecoveryLock(SetRecoveryLockCommand),
    ShutDownDevice,
    /// Any command not modelled above; `fields` go out next to `commandType` unchanged.
    Custom { command_type: String, fields: Map<String, Value> },
}

impl MdmCommand {
    pub fn command_type(&self) -> &str {
        match self {
            MdmCommand::EnableLostMode(_) => "ENABLE_LOST_MODE",
            MdmCommand::EraseDevice(_) => "ERASE_DEVICE",
            MdmCommand::LogOutUser => "LOG_OUT_USER",
            MdmCommand::RestartDevice(_) => "RESTART_DEVICE",
            MdmCommand::SetRecoveryLock(_) => "SET_RECOVERY_LOCK",
            MdmCommand::ShutDownDevice => "SHUT_DOWN_DEVICE",
            MdmCommand::Custom { command_type, .. } => command_type,
        }
    }

    /// The `commandData` object of a send request.
    pub fn command_data(&self) -> Result<Value> {
        let mut data = match self {
            MdmCommand::EnableLostMode(command) => serde_json::to_value(command)?,
            MdmCommand::EraseDevice(command) => serde_json::to_value(command)?,
            MdmCommand::RestartDevice(command) => serde_json::to_value(command)?,
            MdmCommand::SetRecoveryLock(command) => serde_json::to_value(command)?,
            MdmCommand::LogOutUser | MdmCommand::ShutDownDevice => Value::Object(Map::new()),
            MdmCommand::Custom { fields, .. } => Value::Object(fields.clone()),
        };
        if let Value::Object(map) = &mut data {
            map.insert("commandType".to_owned(), Value::String(self.command_type().to_owned()));
        }
        Ok(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableLostModeCommand {
    pub lost_mode_message: String,
    pub lost_mode_phone: String,
    pub lost_mode_footnote: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EraseDeviceCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_data_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_proximity_setup: Option<bool>,
    /// six digit unlock pin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obliteration_behavior: Option<ObliterationBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to_service: Option<ReturnToService>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObliterationBehavior {
    Default,
    DoNotObliterate,
    ObliterateWithWarning,
    Always,
}

/// Profiles are base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnToService {
    pub enabled: bool,
    pub mdm_profile_data: String,
    pub wifi_profile_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartDeviceCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebuild_kernel_cache: Option<bool>,
    /// only used with `rebuild_kernel_cache`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kext_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_user: Option<bool>,
}

/// An empty `new_password` clears the Recovery Lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecoveryLockCommand {
    pub new_password: String,
}
