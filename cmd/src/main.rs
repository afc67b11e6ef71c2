use anyhow::Context;
use std::io::{BufWriter, Write};
use tinycode::{Coder, DEFAULT_ALPHABET, DEFAULT_BLOCK_SIZE, DEFAULT_MIN_LENGTH};

const DEMO_VALUE: u64 = 1337;

fn init_logs(verbose: u8) -> anyhow::Result<()> {
    // Each '-v' raises the level by one step.
    let level = match verbose {
        0 => simplelog::LevelFilter::Error,
        1 => simplelog::LevelFilter::Warn,
        2 => simplelog::LevelFilter::Info,
        3 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("unable to initialize logging")?;
    Ok(())
}

fn build_coder(args: &clap::ArgMatches) -> anyhow::Result<Coder> {
    let alphabet = args
        .get_one::<String>("alphabet")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ALPHABET);
    let block_size = args.get_one::<u32>("block-size").copied().unwrap_or(DEFAULT_BLOCK_SIZE);
    let min_length = args.get_one::<usize>("min-length").copied().unwrap_or(DEFAULT_MIN_LENGTH);

    Coder::with_config(alphabet, block_size, min_length)
        .map_err(Into::<anyhow::Error>::into)
        .context("invalid coder configuration")
}

fn run_encode(coder: &Coder, args: &clap::ArgMatches) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(std::io::stdout());

    for value in args.get_many::<u64>("value").unwrap_or_default() {
        let code = coder.encode(*value, 0);
        log::info!("encoded {} as {}", value, code);

        writeln!(writer, "{}", code)?;
    }

    writer.flush()?;
    Ok(())
}

fn run_decode(coder: &Coder, args: &clap::ArgMatches) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(std::io::stdout());

    for code in args.get_many::<String>("code").unwrap_or_default() {
        let value = coder
            .decode(code)
            .map_err(Into::<anyhow::Error>::into)
            .with_context(|| format!("unable to decode {:?}", code))?;
        log::info!("decoded {} as {}", code, value);

        writeln!(writer, "{}", value)?;
    }

    writer.flush()?;
    Ok(())
}

fn run_demo(coder: &Coder) -> anyhow::Result<()> {
    let code = coder.encode(DEMO_VALUE, 5);
    let decoded = coder.decode(&code).context("unable to decode the demo code")?;

    println!("Encoded id: {}", code);
    println!("Decoded id: {}", decoded);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let root_command = clap::Command::new("tcode")
        .version(clap::crate_version!())
        .about("Turn integers into short non-sequential codes and back")
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("encode").about("Encode integers into codes").arg(
                clap::Arg::new("value")
                    .help("The integers to encode")
                    .action(clap::ArgAction::Append)
                    .value_parser(clap::value_parser!(u64))
                    .required(true)
                    .value_name("VALUE"),
            ),
        )
        .subcommand(
            clap::Command::new("decode").about("Decode codes back into integers").arg(
                clap::Arg::new("code")
                    .help("The codes to decode")
                    .action(clap::ArgAction::Append)
                    .required(true)
                    .value_name("CODE"),
            ),
        )
        .subcommand(clap::Command::new("demo").about("Encode and decode a sample id"))
        .arg(
            clap::Arg::new("alphabet")
                .help("The characters used as digits, the first one is also used for padding")
                .short('a')
                .long("alphabet")
                .action(clap::ArgAction::Set)
                .value_name("ALPHABET")
                .global(true),
        )
        .arg(
            clap::Arg::new("block-size")
                .help("How many low-order bits are shuffled")
                .short('b')
                .long("block-size")
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(u32))
                .value_name("BITS")
                .global(true),
        )
        .arg(
            clap::Arg::new("min-length")
                .help("Pad codes to at least this many characters")
                .short('l')
                .long("min-length")
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .value_name("LENGTH")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .help("Increase logging verbosity")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .global(true),
        );

    let matches = root_command.get_matches();

    let (name, sub_matches) = match matches.subcommand() {
        Some(subcommand) => subcommand,
        None => unreachable!("should never happen because of subcommand_required"),
    };

    // Global args are only propagated down, so read them from the subcommand.
    init_logs(sub_matches.get_count("verbose"))?;

    let result = build_coder(sub_matches).and_then(|coder| match name {
        "encode" => run_encode(&coder, sub_matches),
        "decode" => run_decode(&coder, sub_matches),
        "demo" => run_demo(&coder),
        _ => unreachable!("unknown subcommand {}", name),
    });

    if let Err(err) = result {
        eprintln!("unable to run {}, got err {:#}", name, err);
        std::process::exit(1);
    }

    Ok(())
}
