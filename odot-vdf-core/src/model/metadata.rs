//! fixed values reported to the host during plugin discovery.

use serde::{Deserialize, Serialize};

use crate::model::{OdotVdf, VolumeDelayFunction};

/// readable name shown in the host's volume-delay function dialog
pub const VDF_NAME: &str = "ODOTVDF";

/// unique id stored in version files and procedure parameters. the host
/// only accepts the characters 0..9, a..z and A..Z.
pub const VDF_ID: &str = "ODOTVDF";

/// version of the host interface header these functions follow
pub const INTERFACE_VERSION: i32 = 1;

pub const IS_THREAD_SAFE: bool = true;

pub const DEPENDS_ON_TSYS: bool = false;

/// tests whether an id satisfies the host's identifier rule
pub fn is_valid_vdf_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// summary of everything the plugin reports about itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VdfMetadata {
    pub name: String,
    pub id: String,
    pub interface_version: i32,
    pub is_thread_safe: bool,
    pub depends_on_tsys: bool,
}

impl VdfMetadata {
    /// metadata of a plugin exporting `vdf`. only the name depends on the
    /// function, the id, version and flags belong to the exports.
    pub fn for_function<F: VolumeDelayFunction>(vdf: &F) -> VdfMetadata {
        VdfMetadata {
            name: vdf.name().to_string(),
            id: VDF_ID.to_string(),
            interface_version: INTERFACE_VERSION,
            is_thread_safe: IS_THREAD_SAFE,
            depends_on_tsys: DEPENDS_ON_TSYS,
        }
    }
}

impl Default for VdfMetadata {
    fn default() -> Self {
        VdfMetadata::for_function(&OdotVdf)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::VdfInput;

    #[test]
    fn test_id_is_valid() {
        assert!(is_valid_vdf_id(VDF_ID));
        assert!(is_valid_vdf_id("Vdf2024"));
        assert!(!is_valid_vdf_id(""));
        assert!(!is_valid_vdf_id("ODOT_VDF"));
        assert!(!is_valid_vdf_id("ODOT VDF"));
        assert!(!is_valid_vdf_id("ÖDOT"));
    }

    #[test]
    fn test_metadata_json() {
        let json = serde_json::to_value(VdfMetadata::default())
            .expect("test invariant failed: metadata should serialize");
        assert_eq!(json["name"], "ODOTVDF");
        assert_eq!(json["interface_version"], 1);
        assert_eq!(json["is_thread_safe"], true);
        assert_eq!(json["depends_on_tsys"], false);
    }

    #[test]
    fn test_name_comes_from_function() {
        struct Flat;
        impl VolumeDelayFunction for Flat {
            fn name(&self) -> &'static str {
                "FLAT"
            }
            fn calc(&self, input: &VdfInput) -> f64 {
                input.link.free_flow_time
            }
        }
        let flat = VdfMetadata::for_function(&Flat);
        assert_eq!(flat.name, "FLAT");
        assert_eq!(flat.id, VDF_ID);
        assert_eq!(VdfMetadata::default().name, OdotVdf.name());
    }
}
