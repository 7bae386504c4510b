use crate::color::BLANK;
use crate::config::{init_logging, Args, Settings};
use crate::frame::SkyFrame;
use crate::input::{collect_input_nonblocking, map_event_to_action, Action};
use crate::render::{canvas_to_cells, draw_clock, Terminal};
use anyhow::Context;
use clap::Parser;
use crossterm::style::Color;
use log::{debug, info, trace};
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    term: Terminal,
    should_quit: bool,
    full_redraw: bool,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let term = Terminal::begin().context("could not take over the terminal")?;
        info!("display {}x{} cells", term.cols, term.rows);
        Ok(Self {
            settings,
            term,
            should_quit: false,
            full_redraw: true,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.settings.fps_cap as f32);

        while !self.should_quit {
            if self.term.resize_if_needed()? {
                debug!("resized to {}x{} cells", self.term.cols, self.term.rows);
                self.full_redraw = true;
            }

            // input
            for ev in collect_input_nonblocking(frame_dt)? {
                match map_event_to_action(&ev) {
                    Some(Action::Quit) => {
                        self.should_quit = true;
                        break;
                    }
                    Some(Action::ToggleSmoothSky) => {
                        self.settings.smooth_sky = !self.settings.smooth_sky;
                        debug!("smooth sky: {}", self.settings.smooth_sky);
                    }
                    Some(Action::ToggleClock) => {
                        self.settings.show_clock = !self.settings.show_clock;
                    }
                    None => {}
                }
            }
            if self.should_quit {
                break;
            }

            let started = Instant::now();
            self.render_frame(started)?;

            // frame cap
            spin_sleep(frame_dt, started);
        }
        Ok(())
    }

    fn render_frame(&mut self, now: Instant) -> anyhow::Result<()> {
        // one sample per frame; every model below reads this value
        let sample = self.settings.time.sample(now, self.settings.smooth_sky);
        let vp = self.term.canvas.viewport();
        let frame = SkyFrame::compute(&sample, vp);
        trace!("{sample:?} {vp:?} sky={:?}", frame.sky);

        let bg = if self.settings.enable_color {
            frame.sky.to_term()
        } else {
            Color::Black
        };
        self.term.cur.clear(bg);
        self.term.canvas.clear(BLANK);

        for body in frame.bodies() {
            if body.drawable() {
                self.term
                    .canvas
                    .fill_circle(body.pos.x, body.pos.y, body.radius, body.color);
            }
        }

        canvas_to_cells(
            &self.term.canvas,
            &mut self.term.cur,
            self.settings.enable_color,
            bg,
        );

        if self.settings.show_clock {
            draw_clock(&mut self.term.cur, &frame.label, Color::White);
        }

        self.term.present(!self.full_redraw)?;
        self.full_redraw = false;
        Ok(())
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let settings = Settings::from_args(Args::parse(), Instant::now());
    init_logging(&settings)?;
    info!(
        "starting: fps={} time={:?} smooth_sky={}",
        settings.fps_cap, settings.time, settings.smooth_sky
    );

    let mut app = App::init(settings)?;
    let result = app.run();
    // restore the terminal even if the loop failed
    let ended = app.term.end();
    result?;
    ended?;
    info!("bye");
    Ok(())
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
