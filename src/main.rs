use std::io;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{bail, Context};
use clap::{crate_version, App, Arg, ArgMatches};
use log::warn;
use lifegame::benchmark::Benchmark;
use lifegame::board::{Board, HeadlessBoard, TextBoard};
use lifegame::config::*;
use lifegame::*;

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let matches = App::new("lifegame")
    .version(crate_version!())
    .about("Conway's Game of Life on a bounded board")
    .arg(Arg::with_name("width").long("width").takes_value(true)
      .help("board width in cells [default: 100]"))
    .arg(Arg::with_name("height").long("height").takes_value(true)
      .help("board height in cells [default: 62]"))
    .arg(Arg::with_name("cell-size").long("cell-size").takes_value(true)
      .help("pixels per cell in snapshots [default: 7]"))
    .arg(Arg::with_name("period").long("period").takes_value(true)
      .help("milliseconds between generations, 0 for fastest [default: 1000]"))
    .arg(Arg::with_name("filling").long("filling").takes_value(true)
      .help("all-dead, all-live, golden or a live probability [default: golden]"))
    .arg(Arg::with_name("rule").long("rule").takes_value(true)
      .help("rule in S/B notation, e.g. 23/36 [default: 23/3]"))
    .arg(Arg::with_name("seed").long("seed").takes_value(true)
      .help("seed of the random filling"))
    .arg(Arg::with_name("board").long("board").takes_value(true)
      .possible_values(&["text", "headless"])
      .help("how the board is shown [default: text]"))
    .arg(Arg::with_name("pause-after").long("pause-after").takes_value(true)
      .help("pause after this many generations"))
    .arg(Arg::with_name("from").long("from").takes_value(true)
      .possible_values(&["beginning", "current"])
      .requires("pause-after")
      .help("count --pause-after from the beginning or from now [default: beginning]"))
    .arg(Arg::with_name("generations").long("generations").takes_value(true)
      .help("stop after this many timer firings"))
    .arg(Arg::with_name("snapshot").long("snapshot").takes_value(true)
      .help("save an image of the final board to this path"))
    .arg(Arg::with_name("benchmark").long("benchmark")
      .help("measure generations per second instead of playing"))
    .arg(Arg::with_name("yes").long("yes").short("y")
      .help("play on huge boards without asking"))
    .get_matches();

  let config = session_config(&matches)?;
  if let Err(e) = config.check_size() {
    if !matches.is_present("yes") {
      bail!("{}; pass --yes to play anyway", e);
    }
    warn!("{}", e);
  }

  if matches.is_present("benchmark") {
    let bench = Benchmark::run(&config)?;
    println!("Result: {}", bench);
    return Ok(());
  }

  let board: Box<dyn Board> = match config.board {
    BoardKind::Text => Box::new(TextBoard::new(io::stdout(), config.cell_size)),
    BoardKind::Headless => Box::new(HeadlessBoard::new(config.cell_size)),
  };
  let mut session = Session::new(&config, board)?;
  session.run_cycle();
  session.run_loop(parse_arg(&matches, "generations")?)?;
  let grid = session.over();

  if let Some(path) = matches.value_of("snapshot") {
    export::save_image(&grid, config.cell_size, path)
      .with_context(|| format!("could not save snapshot to {}", path))?;
  }
  Ok(())
}

fn session_config(matches: &ArgMatches) -> anyhow::Result<SessionConfig> {
  let mut config = SessionConfig::default();
  if let Some(width) = parse_arg(matches, "width")? {
    config.width = width;
  }
  if let Some(height) = parse_arg(matches, "height")? {
    config.height = height;
  }
  if let Some(cell_size) = parse_arg(matches, "cell-size")? {
    config.cell_size = cell_size;
  }
  if let Some(ms) = parse_arg(matches, "period")? {
    config.period = Duration::from_millis(ms);
  }
  if let Some(filling) = matches.value_of("filling") {
    config.filling = parse_filling(filling)?;
  }
  if let Some(rule) = matches.value_of("rule") {
    config.rule = Rule::parse_or(rule, config.rule);
  }
  config.seed = parse_arg(matches, "seed")?;
  if let Some(board) = parse_arg(matches, "board")? {
    config.board = board;
  }
  if let Some(generations) = parse_arg(matches, "pause-after")? {
    let from = match matches.value_of("from") {
      Some("current") => PauseFrom::Current,
      _ => PauseFrom::Beginning,
    };
    config.pause_after = Some(PauseAfter { generations, from });
  }
  config.validate()?;
  Ok(config)
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> anyhow::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  matches.value_of(name)
    .map(|value| value.parse::<T>().with_context(|| format!("invalid --{} {:?}", name, value)))
    .transpose()
}

fn parse_filling(src: &str) -> anyhow::Result<Filling> {
  Ok(match src {
    "all-dead" => Filling::AllDead,
    "all-live" => Filling::AllLive,
    "golden" => Filling::GOLDEN,
    _ => {
      let p = src.parse().with_context(|| format!("invalid --filling {:?}", src))?;
      Filling::Random(p)
    }
  })
}
