mod app;
mod band;
mod celestial;
mod clock;
mod color;
mod config;
mod frame;
mod input;
mod interp;
mod render;
mod sky;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
