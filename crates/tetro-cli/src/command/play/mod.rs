use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::Context as _;
use tetro_engine::{GameConfig, GameSeed};

use crate::{
    command::ModeArg,
    settings::SettingsStore,
    tui::{Runtime, ScreenStack},
};

use self::screens::MenuScreen;

mod screens;

const DEFAULT_SETTINGS_PATH: &str = "./data/settings.json";

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct PlayArg {
    /// Settings file holding the best score and the selected design
    #[clap(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,
    /// Game mode preselected in the menu
    #[clap(long, value_enum, default_value_t)]
    mode: ModeArg,
    /// Hexadecimal seed (1 to 32 digits) prefilled in the menu
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Keep gravity from accelerating past level 17
    #[clap(long)]
    no_kill_screen: bool,
    /// Board width in cells
    #[clap(long, default_value_t = 10)]
    width: usize,
    /// Board height in cells, including the two hidden rows
    #[clap(long, default_value_t = 22)]
    height: usize,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            settings: PathBuf::from(DEFAULT_SETTINGS_PATH),
            mode: ModeArg::default(),
            seed: None,
            no_kill_screen: false,
            width: 10,
            height: 22,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = GameConfig {
        grid_width: arg.width,
        grid_height: arg.height,
        seed: arg.seed,
        mode: arg.mode.into(),
        kill_screen: !arg.no_kill_screen,
        best_score: 0,
    };
    config.validate().context("Invalid board size")?;

    let settings = SettingsStore::load(arg.settings.clone())?;
    let settings = Rc::new(RefCell::new(settings));

    let mut app = ScreenStack::new(Box::new(MenuScreen::new(config, Rc::clone(&settings))));
    Runtime::new().run(&mut app)?;

    eprintln!("Best score: {}", settings.borrow().settings().best_score);
    Ok(())
}
