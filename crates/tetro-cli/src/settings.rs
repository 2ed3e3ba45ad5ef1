//! Player settings persisted between runs.

use std::{cell::RefCell, io, path::PathBuf, rc::Rc};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    palette::Design,
    util::{self, Output},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub best_score: u64,
    pub design: Design,
}

/// Settings store shared by the menu and the game screens.
pub type SharedSettings = Rc<RefCell<SettingsStore>>;

/// Settings bound to the JSON file they are saved to.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Reads the settings file; a missing file yields the defaults.
    pub fn load(path: PathBuf) -> anyhow::Result<Self> {
        let settings = match util::read_json_file("settings", &path) {
            Ok(settings) => settings,
            Err(e)
                if e.downcast_ref::<io::Error>()
                    .is_some_and(|e| e.kind() == io::ErrorKind::NotFound) =>
            {
                Settings::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Saves `points` as the new best score if it beats the recorded one.
    ///
    /// Returns whether the best score changed.
    pub fn record_score(&mut self, points: u64) -> anyhow::Result<bool> {
        if points <= self.settings.best_score {
            return Ok(false);
        }
        self.settings.best_score = points;
        self.save()?;
        Ok(true)
    }

    pub fn set_design(&mut self, design: Design) -> anyhow::Result<()> {
        if self.settings.design != design {
            self.settings.design = design;
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        Output::create(self.path.clone())?
            .write_json(&self.settings)
            .context("Failed to save settings")
    }
}
