
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tOutfile: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            _ => log::LevelFilter::Debug.to_string(),
        },
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap()
    );

    let ifile = args.value_of("INPUT").unwrap();
    // Read the specified input file.
    let ipath = Path::new(ifile);

    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let source: Vec<String> = match BufReader::new(ifile).lines().collect() {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(lines) => lines,
    };

    let words = match assembler::assemble(&source) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        },
        Ok(words) => words,
    };
    info!("assembled {} instruction(s) from {} source line(s)", words.len(), source.len());

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for (idx, word) in words.iter().enumerate() {
            grid.add(Cell::from(format!("0x{:02X}:", idx)));
            grid.add(Cell::from(format!("0x{:04X}", word)));
        }

        println!("{}", grid.fit_into_columns(2));
    }

    let listing = assembler::listing::render(&words);

    // With no outfile the listing goes to the terminal.
    match args.value_of("output") {
        Some(filename) => {
            let opath = Path::new(filename);
            let mut ofile = match File::create(&opath) {
                Err(err) => {
                    error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
                    std::process::exit(1);
                },
                Ok(file) => file,
            };

            for entry in &listing {
                if let Err(err) = writeln!(ofile, "{}", entry) {
                    error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
                    std::process::exit(1);
                }
            }
            info!("wrote {} word(s) to `{}`", listing.len(), opath.display());
        },
        None => {
            for entry in &listing {
                println!("{}", entry);
            }
        },
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the listing to an outfile instead of stdout"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .takes_value(false)
            .help("prints an address/word grid alongside the listing"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply().ok();
}
