#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Word Defence session.
//!
//! The host drives the simulation with a scripted autoplay typist: each
//! frame it queues the next letter of the locked target (or the first
//! letter of the lowest-id enemy), drains the bounded input queue into
//! `PressKey` commands, ticks the world, and runs the pure systems to
//! quiescence exactly as the replay harnesses do.

mod input_queue;
mod report_transfer;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use word_defence_core::{Command, Event, Phase, SessionReport};
use word_defence_rendering::{Color, FieldPresentation, Scene};
use word_defence_system_bootstrap::Bootstrap;
use word_defence_system_spawning::{Config as SpawnConfig, Spawning, WordBank};
use word_defence_system_waves::WaveControl;
use word_defence_world::{self as world, query, World};

use input_queue::InputQueue;

const INPUT_QUEUE_CAPACITY: usize = 32;

const FIELD_BACKGROUND: Color = Color::from_rgb_u8(12, 12, 24);
const FLOOR_LINE: Color = Color::from_rgb_u8(200, 60, 60);

/// Command-line arguments accepted by the demo host.
#[derive(Debug, Parser)]
#[command(name = "word-defence", about = "Headless Word Defence demo host")]
struct Args {
    /// Seed for the spawn scheduler; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Frames between autoplay keystrokes.
    #[arg(long, default_value_t = 6)]
    keystroke_cadence: u32,
    /// Decode a previously exported report string and exit.
    #[arg(long)]
    decode_report: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(encoded) = &args.decode_report {
        let report = report_transfer::decode(encoded)?;
        print_report(&report);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut world = World::new();
    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    println!("seed: {seed:#018x}");

    let mut spawning = Spawning::new(SpawnConfig::new(seed));
    let mut wave_control = WaveControl::new();
    let mut bank = WordBank::new();
    let mut queue = InputQueue::new(INPUT_QUEUE_CAPACITY);

    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession, &mut events);
    let _ = run_systems(
        &mut world,
        &mut spawning,
        &mut wave_control,
        &mut bank,
        events,
    );

    let dt = Duration::from_millis(args.tick_ms.max(1));
    let cadence = args.keystroke_cadence.max(1);
    let mut final_report = None;

    for frame in 0..args.frames {
        if frame % cadence == 0 {
            if let Some(key) = next_autoplay_key(&world) {
                queue.push(key);
            }
        }

        let mut events = Vec::new();
        for key in queue.drain() {
            world::apply(&mut world, Command::PressKey { key }, &mut events);
        }
        world::apply(&mut world, Command::Tick { dt }, &mut events);

        let seen = run_systems(
            &mut world,
            &mut spawning,
            &mut wave_control,
            &mut bank,
            events,
        );
        for event in &seen {
            if let Event::SessionEnded { report } = event {
                final_report = Some(*report);
            }
        }
        if final_report.is_some() {
            break;
        }
    }

    match final_report {
        Some(report) => {
            println!("session over after {:?}", query::game_time(&world));
            print_report(&report);
            println!("transfer: {}", report_transfer::encode(&report));
        }
        None => {
            let hud = query::hud(&world);
            println!(
                "session still running after {} frames: score {} wave {} lives {}",
                args.frames, hud.score, hud.wave, hud.lives
            );
        }
    }

    let scene = compose_scene(&world);
    println!(
        "final frame: {} words falling, {} projectiles, {} sparks",
        scene.enemies.len(),
        scene.projectiles.len(),
        scene.sparks.len()
    );

    Ok(())
}

/// Composes the presentation scene for the world's current frame.
fn compose_scene(world: &World) -> Scene {
    let rules = query::rules(world);
    let field = FieldPresentation::new(query::field(world), FIELD_BACKGROUND, FLOOR_LINE);
    let enemies = query::enemy_view(world).into_vec();
    Scene::compose(
        field,
        query::phase(world),
        query::hud(world),
        query::wave_view(world).number,
        rules.speed(),
        &enemies,
        query::typing_target(world),
        &query::projectile_view(world),
        &query::particle_view(world),
    )
}

/// Next letter the scripted typist should press, if any.
fn next_autoplay_key(world: &World) -> Option<char> {
    if query::phase(world) != Phase::Playing {
        return None;
    }

    let enemies = query::enemy_view(world);
    match query::typing_target(world) {
        Some(target) => enemies
            .iter()
            .find(|enemy| enemy.id == target.enemy)
            .and_then(|enemy| enemy.word.letter(enemy.typed)),
        None => enemies
            .iter()
            .next()
            .map(|enemy| enemy.word.first_letter()),
    }
}

/// Applies system-emitted commands until no system has anything left to say,
/// returning every event observed along the way.
fn run_systems(
    world: &mut World,
    spawning: &mut Spawning,
    wave_control: &mut WaveControl,
    bank: &mut WordBank,
    pending_events: Vec<Event>,
) -> Vec<Event> {
    let mut events = pending_events;
    let mut seen = events.clone();

    loop {
        if events.is_empty() {
            break;
        }

        let phase = query::phase(world);
        let rules = query::rules(world);
        let wave = query::wave_view(world);
        let enemies = query::enemy_view(world);
        let mut commands = Vec::new();
        spawning.handle(&events, phase, rules, wave, &enemies, bank, &mut commands);
        wave_control.handle(&events, phase, wave, &enemies, &mut commands);

        if commands.is_empty() {
            break;
        }

        events = Vec::new();
        for command in commands {
            world::apply(world, command, &mut events);
        }
        seen.extend(events.iter().cloned());
    }

    seen
}

fn print_report(report: &SessionReport) {
    println!(
        "score {} | wave {} | words {} | best combo {} | accuracy {}%",
        report.score, report.wave_reached, report.words_destroyed, report.max_combo, report.accuracy
    );
}
