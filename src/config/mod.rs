use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::calendar::PaydayAdjustment;
use crate::ledger::pay_period::PaydaySetting;
use crate::utils::{app_data_dir, config_file_in};

const TMP_SUFFIX: &str = "tmp";

/// Persisted user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub payday_anchor: u32,
    pub payday_adjustment: PaydayAdjustment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            payday_anchor: 25,
            payday_adjustment: PaydayAdjustment::AsIs,
        }
    }
}

impl Config {
    /// Validated payday setting derived from the stored fields.
    pub fn payday_setting(&self) -> Result<PaydaySetting, LedgerError> {
        PaydaySetting::new(self.payday_anchor, self.payday_adjustment)
    }
}

/// Loads and saves the settings file under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the config atomically via a temp file rename. Settings that
    /// would not construct a valid [`PaydaySetting`] are rejected before
    /// anything touches disk.
    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.payday_setting()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    fs::create_dir_all(path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".");
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}
