mod command;
mod palette;
mod settings;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
