//! Pro API endpoint wrappers.
//!
//! Listing methods check sections, sort and filter fields against the
//! per-endpoint allowlists before anything goes on the wire, and hand back a
//! [`Paginator`] to drive with `collect()` or `pages()`.

pub mod api_options;
pub mod expressions;
pub mod pagination;

use reqwest::Method;
use serde_json::{json, Value};

use crate::client::api_client::ApiClient;
use crate::error::{Result, SdkError};
use crate::models::pro::{
    Computer, MdmCommand, MdmCommandStatus, MobileDevice, Package, RenewMdmProfileResponse, SendMdmCommandResponse,
};
use crate::models::ApiModel;
use crate::pro_api::api_options::*;
use crate::pro_api::expressions::FilterExpression;
use crate::pro_api::pagination::{PageOptions, PaginationRequest, Paginator};

const ALL_SECTIONS: &str = "ALL";
const DEFAULT_SECTION: &str = "GENERAL";

#[derive(Debug, Clone)]
pub struct ProApi {
    client: ApiClient,
}

impl ProApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Computer inventory records. `sections` defaults to `GENERAL`; `ALL` selects every section.
    pub fn get_computer_inventory_v1(&self, sections: &[&str], options: PageOptions) -> Result<Paginator<Computer>> {
        let sections = resolve_sections(sections, COMPUTER_INVENTORY_V1_ALLOWED_SECTIONS)?;
        validate_options(
            &options,
            COMPUTER_INVENTORY_V1_ALLOWED_SORT_FIELDS,
            COMPUTER_INVENTORY_V1_ALLOWED_FILTER_FIELDS,
        )?;
        let request = PaginationRequest::with_options("v1/computers-inventory", options)
            .extra_param("section", sections.join(","));
        Paginator::new(self.client.clone(), request)
    }

    pub fn get_packages_v1(&self, options: PageOptions) -> Result<Paginator<Package>> {
        validate_options(&options, PACKAGES_V1_ALLOWED_SORT_FIELDS, PACKAGES_V1_ALLOWED_FILTER_FIELDS)?;
        Paginator::new(self.client.clone(), PaginationRequest::with_options("v1/packages", options))
    }

    /// MDM command history. The service requires a filter for this listing.
    pub fn get_mdm_commands_v2(&self, options: PageOptions) -> Result<Paginator<MdmCommandStatus>> {
        let filter = options
            .filter
            .as_ref()
            .ok_or_else(|| SdkError::validation("a filter expression is required for MDM commands"))?;
        validate_command_types(filter)?;
        validate_options(&options, MDM_COMMANDS_V2_ALLOWED_SORT_FIELDS, MDM_COMMANDS_V2_ALLOWED_FILTER_FIELDS)?;
        Paginator::new(self.client.clone(), PaginationRequest::with_options("v2/mdm/commands", options))
    }

    pub fn get_mobile_device_inventory_v2(
        &self,
        sections: &[&str],
        options: PageOptions,
    ) -> Result<Paginator<MobileDevice>> {
        let sections = resolve_sections(sections, MOBILE_DEVICE_INVENTORY_V2_ALLOWED_SECTIONS)?;
        validate_options(
            &options,
            MOBILE_DEVICE_INVENTORY_V2_ALLOWED_SORT_FIELDS,
            MOBILE_DEVICE_INVENTORY_V2_ALLOWED_FILTER_FIELDS,
        )?;
        let request = PaginationRequest::with_options("v2/mobile-devices/detail", options)
            .extra_param("section", sections.join(","));
        Paginator::new(self.client.clone(), request)
    }

    /// Renew the MDM profile, identity certificate included, on each device.
    pub async fn renew_mdm_profile_v1(&self, udids: &[&str]) -> Result<RenewMdmProfileResponse> {
        if udids.is_empty() {
            return Err(SdkError::validation("at least one device UDID is required"));
        }
        let body = json!({ "udids": udids });
        let reply: Value = self
            .client
            .pro_api_request(Method::POST, "v1/mdm/renew-profile", None, Some(&body), None)
            .await?
            .json()?;
        let udids_not_processed = reply
            .pointer("/udidsNotProcessed/udids")
            .and_then(Value::as_array)
            .map(|udids| udids.iter().filter_map(Value::as_str).map(str::to_owned).collect())
            .unwrap_or_default();
        Ok(RenewMdmProfileResponse { udids_not_processed })
    }

    /// Send one MDM command to every device in `management_ids`.
    ///
    /// The endpoint is a preview and may change. Management ids come from
    /// `general.managementId` in inventory records.
    pub async fn send_mdm_command_preview(
        &self,
        management_ids: &[&str],
        command: &MdmCommand,
    ) -> Result<Vec<SendMdmCommandResponse>> {
        if management_ids.is_empty() {
            return Err(SdkError::validation("at least one management id is required"));
        }
        let client_data: Vec<Value> = management_ids.iter().map(|id| json!({ "managementId": id })).collect();
        let body = json!({ "clientData": client_data, "commandData": command.command_data()? });
        let reply: Vec<Value> = self
            .client
            .pro_api_request(Method::POST, "preview/mdm/commands", None, Some(&body), None)
            .await?
            .json()?;
        reply.into_iter().map(SendMdmCommandResponse::parse).collect()
    }
}

fn resolve_sections(requested: &[&str], allowed: &[&str]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(vec![DEFAULT_SECTION.to_owned()]);
    }
    if requested.contains(&ALL_SECTIONS) {
        return Ok(allowed.iter().filter(|s| **s != ALL_SECTIONS).map(|s| s.to_string()).collect());
    }
    match requested.iter().find(|s| !allowed.contains(*s)) {
        Some(section) => Err(SdkError::validation(format!(
            "section '{}' must be one of: {}",
            section,
            allowed.join(", ")
        ))),
        None => Ok(requested.iter().map(|s| s.to_string()).collect()),
    }
}

fn validate_options(options: &PageOptions, sort_fields: &[&str], filter_fields: &[&str]) -> Result<()> {
    if let Some(sort) = &options.sort {
        sort.validate(sort_fields)?;
    }
    if let Some(filter) = &options.filter {
        filter.validate(filter_fields)?;
    }
    Ok(())
}

fn validate_command_types(filter: &FilterExpression) -> Result<()> {
    let invalid = filter
        .entries()
        .iter()
        .filter(|e| e.name == "command")
        .find(|e| !MDM_COMMANDS_V2_ALLOWED_COMMAND_TYPES.contains(&e.value.as_str()));
    match invalid {
        Some(entry) => Err(SdkError::validation(format!(
            "command filter value '{}' must be one of: {}",
            entry.value,
            MDM_COMMANDS_V2_ALLOWED_COMMAND_TYPES.join(", ")
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pro_api::expressions::FilterField;

    #[test]
    fn sections_default_to_general() {
        let sections = resolve_sections(&[], COMPUTER_INVENTORY_V1_ALLOWED_SECTIONS).unwrap();
        assert_eq!(sections, vec!["GENERAL"]);
    }

    #[test]
    fn all_expands_to_every_concrete_section() {
        let sections = resolve_sections(&["ALL"], COMPUTER_INVENTORY_V1_ALLOWED_SECTIONS).unwrap();
        assert_eq!(sections.len(), COMPUTER_INVENTORY_V1_ALLOWED_SECTIONS.len() - 1);
        assert!(!sections.iter().any(|s| s == "ALL"));

        let mobile = resolve_sections(&["ALL"], MOBILE_DEVICE_INVENTORY_V2_ALLOWED_SECTIONS).unwrap();
        assert_eq!(mobile.len(), MOBILE_DEVICE_INVENTORY_V2_ALLOWED_SECTIONS.len());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = resolve_sections(&["GENERAL", "NOPE"], COMPUTER_INVENTORY_V1_ALLOWED_SECTIONS).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn command_filter_values_are_checked() {
        let valid = FilterField::new("command").eq("DEVICE_LOCK");
        assert!(validate_command_types(&valid).is_ok());

        let invalid = FilterField::new("command").eq("MAKE_COFFEE") & FilterField::new("status").eq("Pending");
        assert!(matches!(validate_command_types(&invalid), Err(SdkError::Validation(_))));
    }
}
