use cosmwasm_schema::cw_serde;

use crate::error::{MerkleError, Result};

/// Default upper bound on the number of sibling digests in a [`crate::MerklePath`].
///
/// A tree indexed by `u64` is never taller than 64 levels, so no valid path
/// can be longer. Verifiers may lower the bound to cap proof size.
pub const DEFAULT_MAX_PATH_LEN: u32 = 64;

/// Verification limits.
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of sibling digests accepted in a path.
    pub max_path_len: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.max_path_len == 0 {
            return Err(MerkleError::InvalidConfig(
                "max_path_len must be greater than 0".to_string(),
            ));
        }
        if self.max_path_len > DEFAULT_MAX_PATH_LEN {
            return Err(MerkleError::InvalidConfig(format!(
                "max_path_len must be at most {DEFAULT_MAX_PATH_LEN}, got {}",
                self.max_path_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validate() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(Config { max_path_len: 1 }.validate(), Ok(()));

        assert_eq!(
            Config { max_path_len: 0 }.validate(),
            Err(MerkleError::InvalidConfig(
                "max_path_len must be greater than 0".to_string()
            ))
        );
        assert_eq!(
            Config { max_path_len: 65 }.validate(),
            Err(MerkleError::InvalidConfig(
                "max_path_len must be at most 64, got 65".to_string()
            ))
        );
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let cfg: Config = serde_json::from_str(r#"{"max_path_len":32}"#).unwrap();
        assert_eq!(cfg, Config { max_path_len: 32 });

        assert!(serde_json::from_str::<Config>(r#"{"max_path_len":32,"extra":1}"#).is_err());
    }
}
