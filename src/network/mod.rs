//! Network definitions rendered into interface config files.
//!
//! Field names are what templates see: `{{ name }}`, `{{ ip }}`, `{{ mask }}`,
//! `{{ gateway }}`, `{{ dns }}`, and `{{ bond }}` for slaves.

use std::net::IpAddr;

use serde::Serialize;
use thiserror::Error;

/// Directory the RHEL-style `ifcfg-*` files live in.
pub const NETWORK_SCRIPTS_DIR: &str = "/etc/sysconfig/network-scripts";

/// Path of the interface config file for `device`.
pub fn ifcfg_path(device: &str) -> String {
    format!("{}/ifcfg-{}", NETWORK_SCRIPTS_DIR, device)
}

/// A path parameter that cannot go into a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidParameter {
    /// Empty, `.`, `..`, or containing `/`: it would not name a single file
    /// inside [`NETWORK_SCRIPTS_DIR`].
    #[error("{field} {value:?} is not a device name")]
    DeviceName { field: &'static str, value: String },

    #[error("{field} {value:?} contains control characters")]
    ControlCharacter { field: &'static str, value: String },
}

/// Accept `value` as an interface or bond name.
pub fn device_name(field: &'static str, value: String) -> Result<String, InvalidParameter> {
    let value = field_value(field, value)?;
    if value.is_empty() || value == "." || value == ".." || value.contains('/') {
        return Err(InvalidParameter::DeviceName { field, value });
    }
    Ok(value)
}

/// Accept `value` as a single-line template field.
pub fn field_value(field: &'static str, value: String) -> Result<String, InvalidParameter> {
    if value.chars().any(char::is_control) {
        return Err(InvalidParameter::ControlCharacter { field, value });
    }
    Ok(value)
}

/// Normalize a peer address for use in generated files.
/// IPv4 peers on a dual-stack socket show up as `::ffff:a.b.c.d`.
pub fn caller_ip(ip: IpAddr) -> String {
    ip.to_canonical().to_string()
}

/// A single statically addressed interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterfaceSpec {
    pub name: String,
    pub ip: String,
    pub mask: String,
    pub gateway: String,
    pub dns: String,
}

/// A bond device carrying the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BondSpec {
    pub name: String,
    pub ip: String,
    pub mask: String,
    pub gateway: String,
    pub dns: String,
}

/// A physical interface enslaved to a bond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaveSpec {
    pub name: String,
    pub bond: String,
}

impl NetworkInterfaceSpec {
    /// Checked constructor for request input. `ip` is the caller's address.
    pub fn new(
        name: String,
        ip: String,
        mask: String,
        gateway: String,
        dns: String,
    ) -> Result<Self, InvalidParameter> {
        Ok(Self {
            name: device_name("nic", name)?,
            ip,
            mask: field_value("mask", mask)?,
            gateway: field_value("gateway", gateway)?,
            dns: field_value("dns", dns)?,
        })
    }
}

impl BondSpec {
    /// Checked constructor for request input. `ip` is the caller's address.
    pub fn new(
        name: String,
        ip: String,
        mask: String,
        gateway: String,
        dns: String,
    ) -> Result<Self, InvalidParameter> {
        Ok(Self {
            name: device_name("bond", name)?,
            ip,
            mask: field_value("mask", mask)?,
            gateway: field_value("gateway", gateway)?,
            dns: field_value("dns", dns)?,
        })
    }

    /// Slave definition for `nic` under this bond.
    pub fn slave(&self, nic: impl Into<String>) -> Result<SlaveSpec, InvalidParameter> {
        Ok(SlaveSpec {
            name: device_name("slave", nic.into())?,
            bond: self.name.clone(),
        })
    }
}
