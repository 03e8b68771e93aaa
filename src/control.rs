use serde::{Deserialize, Serialize};
use svbony_sys as sys;

use crate::common::{ControlType, known};
use crate::error::Result;
use crate::misc::fixed_cstr_to_string;

/// Description of one camera control (`SVB_CONTROL_CAPS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCaps {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "MaxValue")]
    pub max_value: i64,
    #[serde(rename = "MinValue")]
    pub min_value: i64,
    #[serde(rename = "DefaultValue")]
    pub default_value: i64,
    #[serde(rename = "IsAutoSupported")]
    pub is_auto_supported: bool,
    #[serde(rename = "IsWritable")]
    pub is_writable: bool,
    #[serde(rename = "ControlType")]
    pub control_type: ControlType,
}

impl ControlCaps {
    pub fn from_native(caps: &sys::SVB_CONTROL_CAPS) -> Result<Self> {
        Ok(Self {
            name: fixed_cstr_to_string(&caps.Name),
            description: fixed_cstr_to_string(&caps.Description),
            max_value: i64::from(caps.MaxValue),
            min_value: i64::from(caps.MinValue),
            default_value: i64::from(caps.DefaultValue),
            is_auto_supported: caps.IsAutoSupported != sys::SVB_FALSE,
            is_writable: caps.IsWritable != sys::SVB_FALSE,
            control_type: known(ControlType::from_raw(caps.ControlType), "control type", caps.ControlType)?,
        })
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_char;

    #[test]
    fn caps_from_native() {
        let mut raw = sys::SVB_CONTROL_CAPS::default();
        for (d, b) in raw.Name.iter_mut().zip(b"Exposure") {
            *d = *b as c_char;
        }
        raw.MinValue = 29;
        raw.MaxValue = 2_000_000_000;
        raw.DefaultValue = 30_000;
        raw.IsAutoSupported = sys::SVB_TRUE;
        raw.IsWritable = sys::SVB_TRUE;
        raw.ControlType = sys::SVB_EXPOSURE;

        let caps = ControlCaps::from_native(&raw).unwrap();
        assert_eq!(caps.name, "Exposure");
        assert_eq!(caps.description, "");
        assert_eq!(caps.control_type, ControlType::Exposure);
        assert!(caps.contains(30_000));
        assert!(!caps.contains(1));
    }

    #[test]
    fn unknown_control_type() {
        let mut raw = sys::SVB_CONTROL_CAPS::default();
        raw.ControlType = 99;
        assert!(ControlCaps::from_native(&raw).is_err());
    }
}
