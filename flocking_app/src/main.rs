use std::{fs::File, io::BufReader};

use clap_serde_derive::{clap::Parser, ClapSerde};
use flocking_lib::{
    glam::Vec2 as WorldPoint,
    options::{OptionsError, RunOptions, TrackerType},
    pacer::FramePacer,
    simulation::{BoidView, Command, FrameInput, FrameSnapshot, Simulation, MENU_LINES},
};
use log::{debug, error, info};
use nannou::{color::IntoLinSrgba, draw::properties::ColorScalar, prelude::*};

mod cliargs;
use cliargs::{Args, Config};

const PREDATOR_RADIUS: f32 = 10.;
const TEXT_MARGIN: f32 = 10.;
const LINE_HEIGHT: f32 = 20.;
const TEXT_WIDTH: f32 = 320.;

fn main() {
    nannou::app(model).update(update).run();
}

struct Model {
    simulation: Simulation,
    pacer: FramePacer,
    pending: Vec<Command>,
    snapshot: Option<FrameSnapshot>,
    width: f32,
    height: f32,
    boid_radius: f32,
}

fn model(app: &App) -> Model {
    // Parse whole args with clap
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(f) = File::open(&args.config_path) {
        // Parse config with serde
        match serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f)) {
            // merge config already parsed from clap
            Ok(config) => Config::from(config).merge(&mut args.config),
            Err(err) => panic!("Error in configuration file:\n{}", err),
        }
    } else {
        // If there is not config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    env_logger::Builder::from_default_env()
        .filter_level(if config.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let run_options = match run_options(&config) {
        Ok(ro) => ro,
        Err(err) => panic!("Error in configuration:\n{}", err),
    };
    if let Ok(dump) = serde_yaml::to_string(&run_options) {
        debug!("run options:\n{}", dump);
    }

    let simulation = match Simulation::new(run_options) {
        Ok(simulation) => simulation,
        Err(err) => panic!("Cannot start the simulation:\n{}", err),
    };
    let ro = simulation.options();

    // Esc is a simulation command, the frame carrying it still completes
    app.set_exit_on_escape(false);
    app.new_window()
        .key_pressed(key_pressed)
        .closed(window_closed)
        .size(ro.width as u32, ro.height as u32)
        .resizable(false)
        .title("Boids Simulation")
        .view(view)
        .build()
        .unwrap();

    Model {
        pacer: FramePacer::new(ro.fps),
        width: ro.width,
        height: ro.height,
        boid_radius: ro.boid_radius,
        simulation,
        pending: Vec::new(),
        snapshot: None,
    }
}

fn run_options(config: &Config) -> Result<RunOptions, OptionsError> {
    let tracker_type: TrackerType = config.tracker.parse()?;

    Ok(RunOptions {
        init_boids: config.no_boids,
        width: config.width as f32,
        height: config.height as f32,
        max_speed: config.max_speed,
        max_force: config.max_force,
        perception_radius: config.perception_radius,
        boid_radius: config.boid_radius,
        tracker_type,
        seed: (config.seed != 0).then_some(config.seed),
        sample_rate: config.sample_rate,
        fps: config.fps,
    })
}

fn update(app: &App, model: &mut Model, update: Update) {
    if !model.pacer.ready(update.since_start) {
        return;
    }

    step(app, model);
}

fn step(app: &App, model: &mut Model) {
    let input = FrameInput {
        pointer: to_world(vec2(app.mouse.x, app.mouse.y), model.width, model.height),
        commands: std::mem::take(&mut model.pending),
    };

    match model.simulation.step(&input) {
        Ok(snapshot) => model.snapshot = Some(snapshot),
        Err(err) => {
            error!("{}", err);
            app.quit();
            return;
        }
    }

    if !model.simulation.is_running() {
        app.quit();
    }
}

fn command_for_key(key: Key) -> Option<Command> {
    match key {
        Key::Key1 => Some(Command::ToggleMouseAttraction),
        Key::Key2 => Some(Command::TogglePredator),
        Key::Key3 => Some(Command::ToggleMetrics),
        Key::Escape => Some(Command::Quit),
        _ => None,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if let Some(command) = command_for_key(key) {
        model.pending.push(command);
    }
}

// there is no later update for a closed window, run the quitting frame now
fn window_closed(app: &App, model: &mut Model) {
    info!("window closed after {} frames", model.simulation.frame());
    if model.simulation.is_running() {
        model.pending.push(Command::Quit);
        step(app, model);
    }
}

/// Window coordinates are centered with y pointing up, the world has its
/// origin in the top left corner with y pointing down.
fn to_world(p: Vec2, width: f32, height: f32) -> WorldPoint {
    WorldPoint::new(p.x + width / 2., height / 2. - p.y)
}

fn to_screen(p: WorldPoint, width: f32, height: f32) -> Vec2 {
    vec2(p.x - width / 2., height / 2. - p.y)
}

fn draw_boid(draw: &Draw, boid: &BoidView, model: &Model) {
    let vertex = |angle: f32| {
        let offset = WorldPoint::new(angle.cos(), angle.sin()) * model.boid_radius;
        to_screen(boid.position + offset, model.width, model.height)
    };

    draw.tri()
        .points(
            vertex(boid.heading),
            vertex(boid.heading + 2.5),
            vertex(boid.heading - 2.5),
        )
        .color(rgb8(0, 150, 255));
}

fn draw_lines<S, C>(draw: &Draw, lines: &[S], top: f32, left: f32, color: C)
where
    S: AsRef<str>,
    C: IntoLinSrgba<ColorScalar> + Copy,
{
    for (i, line) in lines.iter().enumerate() {
        draw.text(line.as_ref())
            .left_justify()
            .w(TEXT_WIDTH)
            .x_y(left + TEXT_WIDTH / 2., top - i as f32 * LINE_HEIGHT)
            .color(color)
            .font_size(14);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let left = -model.width / 2. + TEXT_MARGIN;
    let top = model.height / 2. - TEXT_MARGIN - LINE_HEIGHT / 2.;

    if let Some(snapshot) = &model.snapshot {
        for boid in snapshot.boids.iter() {
            draw_boid(&draw, boid, model);
        }

        if let Some(predator) = snapshot.predator {
            draw.ellipse()
                .xy(to_screen(predator, model.width, model.height))
                .radius(PREDATOR_RADIUS)
                .color(RED);
        }

        if let Some(metrics) = snapshot.metrics {
            let bottom = -model.height / 2. + TEXT_MARGIN + LINE_HEIGHT * 1.5;
            draw_lines(&draw, &metrics.lines(), bottom, left, YELLOW);
        }
    }

    // the menu is shown on every frame, also before the first step
    draw_lines(&draw, &MENU_LINES, top, left, WHITE);

    draw.to_frame(app, &frame).unwrap();
}
