use std::fs;
use std::path::Path;

use chip8::{load, run_headless};
use chip8_asm::assemble_text;
use chip8_core::{
    Chip8, Chip8Error, Config, RunState, TimerCadence, MODERN_QUIRKS, ORIGINAL_QUIRKS,
};

fn rom_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), bytes).unwrap();
    file
}

fn assembled(source: &str, config: Config) -> Chip8 {
    let rom = assemble_text(source, 0x200).unwrap();
    let mut chip8 = Chip8::with_config(config);
    chip8.load_program(&rom).unwrap();
    chip8
}

#[test]
fn test_headless_stops_on_exit_opcode() {
    let rom = rom_file(&[0x00, 0xFD]);
    let mut chip8 = load(rom.path(), Config::default()).unwrap();
    let outcome = run_headless(&mut chip8, 10, 700).unwrap();
    assert!(outcome.exited);
    assert_eq!(outcome.cycles, 1);
}

#[test]
fn test_load_reports_missing_rom() {
    let err = load(Path::new("/nonexistent/game.ch8"), Config::default()).unwrap_err();
    assert!(err.to_string().contains("unable to open"));
}

#[test]
fn test_load_rejects_oversized_rom() {
    let rom = rom_file(&[0; 0xE01]);
    assert!(load(rom.path(), Config::default()).is_err());
}

#[test]
fn test_draws_digit_glyph() {
    let mut chip8 = assembled(
        "
        LD V0, 7
        LD F, V0
        LD V1, 10
        LD V2, 4
        DRW V1, V2, 5
        EXIT
        ",
        Config::default(),
    );
    run_headless(&mut chip8, 100, 700).unwrap();
    // 7 is 0xF0 0x10 0x20 0x40 0x40
    for x in 10..14 {
        assert_eq!(chip8.pixel(x, 4), 1);
    }
    assert_eq!(chip8.pixel(13, 5), 1);
    assert_eq!(chip8.pixel(12, 6), 1);
    assert_eq!(chip8.pixel(10, 5), 0);
    assert_eq!(chip8.registers().v(0xF), 0);
}

#[test]
fn test_counts_down_with_loop() {
    let mut chip8 = assembled(
        "
        LD V0, 0
    loop:
        ADD V0, 1
        SE V0, 5
        JP loop
        EXIT
        ",
        Config::default(),
    );
    let outcome = run_headless(&mut chip8, 100, 700).unwrap();
    assert!(outcome.exited);
    assert_eq!(chip8.registers().v(0x0), 5);
}

#[test]
fn test_subroutine_round_trip() {
    let mut chip8 = assembled(
        "
        CALL double
        CALL double
        EXIT
    double:
        ADD V3, 2
        ADD V3, V3
        RET
        ",
        Config::default(),
    );
    run_headless(&mut chip8, 100, 700).unwrap();
    assert_eq!(chip8.registers().v(0x3), 12);
    assert_eq!(chip8.registers().depth(), 0);
}

#[test]
fn test_runaway_recursion_overflows_stack() {
    let mut chip8 = assembled("forever: CALL forever", Config::default());
    assert_eq!(
        run_headless(&mut chip8, 100, 700),
        Err(Chip8Error::StackOverflow)
    );
    assert!(matches!(chip8.run_state(), RunState::Halted(_)));
    assert_eq!(chip8.registers().depth(), 16);
}

#[test]
fn test_bcd_and_register_block_copy() {
    let mut chip8 = assembled(
        "
        LD V0, 231
        LD I, scratch
        LD B, V0
        LD I, scratch
        LD V2, [I]
        EXIT
    scratch:
        DB 0, 0, 0
        ",
        Config::default(),
    );
    run_headless(&mut chip8, 100, 700).unwrap();
    assert_eq!(&chip8.registers().all_v()[..3], &[2, 3, 1]);
}

#[test]
fn test_key_wait_resumes_on_key() {
    let mut chip8 = assembled("LD V4, K\nEXIT", Config::default());
    let outcome = run_headless(&mut chip8, 50, 700).unwrap();
    assert!(!outcome.exited);
    assert_eq!(chip8.registers().pc(), 0x200);

    chip8.key_down(0x9).unwrap();
    let outcome = run_headless(&mut chip8, 50, 700).unwrap();
    assert!(outcome.exited);
    assert_eq!(chip8.registers().v(0x4), 0x9);
}

#[test]
fn test_original_profile_shifts_vy() {
    let config = Config {
        quirks: ORIGINAL_QUIRKS,
        ..Config::default()
    };
    let mut chip8 = assembled("LD V2, 3\nSHR V1, V2\nEXIT", config);
    run_headless(&mut chip8, 10, 700).unwrap();
    assert_eq!(chip8.registers().v(0x1), 0x01);
    assert_eq!(chip8.registers().v(0x2), 0x03);
    assert_eq!(chip8.registers().v(0xF), 0x01);
}

#[test]
fn test_modern_profile_wraps_sprites() {
    let config = Config {
        quirks: MODERN_QUIRKS,
        ..Config::default()
    };
    let mut chip8 = assembled(
        "
        LD V0, 60
        LD I, bar
        DRW V0, V1, 1
        EXIT
    bar:
        DB 0xFF
        ",
        config,
    );
    run_headless(&mut chip8, 10, 700).unwrap();
    assert_eq!(chip8.pixel(63, 0), 1);
    assert_eq!(chip8.pixel(0, 0), 1);
    assert_eq!(chip8.pixel(3, 0), 1);
    assert_eq!(chip8.pixel(4, 0), 0);
}

#[test]
fn test_default_profile_clips_sprites() {
    let mut chip8 = assembled(
        "
        LD V0, 60
        LD I, bar
        DRW V0, V1, 1
        EXIT
    bar:
        DB 0xFF
        ",
        Config::default(),
    );
    run_headless(&mut chip8, 10, 700).unwrap();
    assert_eq!(chip8.pixel(63, 0), 1);
    assert_eq!(chip8.pixel(0, 0), 0);
}

#[test]
fn test_manual_timers_follow_simulated_clock() {
    let config = Config {
        timers: TimerCadence::Manual,
        ..Config::default()
    };
    let mut chip8 = assembled(
        "
        LD V0, 3
        LD ST, V0
    spin:
        JP spin
        ",
        config,
    );
    run_headless(&mut chip8, 60, 60).unwrap();
    assert_eq!(chip8.sound_timer(), 0);
    assert!(!chip8.sound_active());
}

#[test]
fn test_dump_after_run() {
    let mut chip8 = assembled("LD I, 0x300\nLD V0, 0xAB\nLD [I], V0\nEXIT", Config::default());
    run_headless(&mut chip8, 10, 700).unwrap();

    let dump = tempfile::NamedTempFile::new().unwrap();
    let mut file = fs::File::create(dump.path()).unwrap();
    chip8.dump_memory(&mut file).unwrap();

    let image = fs::read(dump.path()).unwrap();
    assert_eq!(image.len(), 4096);
    assert_eq!(image[0x300], 0xAB);
    assert_eq!(&image[0..5], &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
}
