use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "GlobalSellerCalc";
const APP_NAME: &str = "GlobalSellerCalc";

fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("state.json"))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    let path = data_file()?;
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalculationInput;

    #[test]
    fn persisted_state_survives_a_json_round_trip() {
        let state = PersistedState {
            inputs: CalculationInput {
                sourcing_price: 88.0,
                ..CalculationInput::default()
            },
            ..PersistedState::default()
        };
        let json = serde_json::to_string_pretty(&state).unwrap();
        let restored: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.inputs.sourcing_price, 88.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        // Older state files may predate newer fields.
        let restored: PersistedState = serde_json::from_str("{}").unwrap();
        assert!(restored.history.is_empty());
        assert_eq!(restored.inputs, CalculationInput::default());
    }
}
