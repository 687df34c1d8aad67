use clap::{CommandFactory, Parser};
use statslib::command::DEFAULT_EMULATOR_PATH;
use statslib::config::{Algorithm, EmulatorParams, ReplacementPolicy};
use crate::Args;

#[test]
fn args_are_well_formed() {
    Args::command().debug_assert();
}

#[test]
fn defaults_match_the_library() {
    let args = Args::try_parse_from(["cachestats"]).unwrap();
    assert_eq!(args.params(), EmulatorParams::default());
    assert_eq!(args.emulator.to_str(), Some(DEFAULT_EMULATOR_PATH));
    assert!(args.config.is_none());
    assert!(args.replay.is_none());
}

#[test]
fn flags_set_every_parameter() {
    let args = Args::try_parse_from([
        "cachestats", "-n", "2", "-b", "16", "-c", "4096", "-r", "LFU", "-a", "add", "-t", "10", "-e", "/tmp/emu",
    ])
    .unwrap();
    let params = args.params();
    assert_eq!(params.associativity, 2);
    assert_eq!(params.block_size, 16);
    assert_eq!(params.cache_size, 4096);
    assert_eq!(params.replacement, ReplacementPolicy::Other("LFU".to_string()));
    assert_eq!(params.algorithm, Algorithm::Other("add".to_string()));
    assert_eq!(params.test_size, 10);
    assert_eq!(params.ram_size(), 1024);
    assert_eq!(args.emulator.to_str(), Some("/tmp/emu"));
}

#[test]
fn replay_conflicts_with_batches() {
    assert!(Args::try_parse_from(["cachestats", "--config", "a.json", "--replay", "b.txt"]).is_err());
    assert!(Args::try_parse_from(["cachestats", "--config", "a.json", "--save-output", "b.txt"]).is_err());
    assert!(Args::try_parse_from(["cachestats", "--save-output", "b.txt"]).is_ok());
}

#[test]
fn sizes_must_be_numbers() {
    assert!(Args::try_parse_from(["cachestats", "-c", "lots"]).is_err());
    assert!(Args::try_parse_from(["cachestats", "-t", "-1"]).is_err());
}

#[test]
fn debug_can_be_switched_either_way() {
    assert!(Args::try_parse_from(["cachestats", "-d"]).unwrap().debug);
    assert!(Args::try_parse_from(["cachestats", "-d", "true"]).unwrap().debug);
    assert!(!Args::try_parse_from(["cachestats", "-d", "false"]).unwrap().debug);
    assert!(!Args::try_parse_from(["cachestats", "--debug=false"]).unwrap().debug);
    let args = Args::try_parse_from(["cachestats", "-d", "-p"]).unwrap();
    assert!(args.debug && args.performance);
}

#[test]
fn emulator_args_accept_flags() {
    let args = Args::try_parse_from(["cachestats", "-e", "taskset", "--emulator-arg", "-c", "--emulator-arg", "0"]).unwrap();
    assert_eq!(args.emulator_args, ["-c", "0"]);
    assert_eq!(args.cache_size, 65536);
}
