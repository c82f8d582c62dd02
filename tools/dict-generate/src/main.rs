mod json_io;

use crate::json_io::{read_reference_json, WordIndexSerde};
use clap::{Arg, ArgAction, Command};
use fastcheck_fmmseg::dictionary_lib::WordIndex;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m"; // Bold Blue
    const RESET: &str = "\x1B[0m"; // Reset color

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("Dictionary Generator")
        .about(format!(
            "{BLUE}Dict Generator: compile a word list into FastCheck dictionary artifacts{RESET}"
        ))
        .after_help(
            "Examples:\n\
         \n\
         dict-generate -i dirty.txt --format cbor --output fastcheck_dict.cbor\n\
         dict-generate -i dirty.txt -w allow.txt --ignore-case --format zstd\n\
         \n\
         The generated Zstd file can be loaded with FastCheck::load_compressed().\n"
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .required(true)
                .help("Word list, one entry per line, or a reference JSON (.json) to re-encode."),
        )
        .arg(
            Arg::new("whitelist")
                .short('w')
                .long("whitelist")
                .value_name("file")
                .help("Whitelist, one word per line."),
        )
        .arg(
            Arg::new("ignore_case")
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Build a case-insensitive dictionary"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("format")
                .default_value("zstd")
                .value_parser(["zstd", "cbor", "json"])
                .help("Dictionary format: [zstd|cbor|json]"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print JSON when --format json")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("filename")
                .help("Write generated dictionary to <filename>. If not specified, a default filename is used."),
        )
        .get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .ok_or("missing --input")?;
    let ignore_case = matches.get_flag("ignore_case");
    let dict_format = matches.get_one::<String>("format").map(String::as_str);
    let pretty_json = matches.get_flag("pretty"); // default compact if false

    let default_output = match dict_format {
        Some("zstd") => "fastcheck_dict.zstd",
        Some("cbor") => "fastcheck_dict.cbor",
        _ => "fastcheck_dict.json",
    };

    let output_file = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or(default_output);

    let reader = BufReader::new(File::open(input_file)?);
    let (mut index, added) = if input_file.to_ascii_lowercase().ends_with(".json") {
        let index = read_reference_json(reader)?;
        let added = index.len();
        (index, added)
    } else {
        let mut index = WordIndex::new(ignore_case);
        let added = index.load_words(reader)?;
        (index, added)
    };
    if let Some(whitelist_file) = matches.get_one::<String>("whitelist") {
        index.load_whitelist(BufReader::new(File::open(whitelist_file)?))?;
    }
    eprintln!("{BLUE}Loaded {added} entries from {input_file}{RESET}");

    match dict_format {
        Some("zstd") => {
            index.save_compressed(output_file)?;
            eprintln!("{BLUE}Dictionary saved in ZSTD format at: {output_file}{RESET}");
        }
        Some("cbor") => {
            index.serialize_to_cbor(output_file)?;
            eprintln!("{BLUE}Dictionary saved in CBOR format at: {output_file}{RESET}");
        }
        Some("json") => {
            // DTO keeps keys as sorted Strings
            write_reference_json(&index, output_file, pretty_json)?;
            let style = if pretty_json { "pretty" } else { "compact" };
            eprintln!("{BLUE}Dictionary saved in JSON ({style}) at: {output_file}{RESET}");
        }
        other => unreachable!("--format is restricted by clap: {:?}", other),
    }

    Ok(())
}

pub fn write_reference_json(
    index: &WordIndex,
    path: impl AsRef<Path>,
    pretty: bool,
) -> io::Result<()> {
    let dto: WordIndexSerde = index.into();
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut w, &dto).map_err(to_io)?;
    } else {
        serde_json::to_writer(&mut w, &dto).map_err(to_io)?;
        // newline for POSIX-y tools
        w.write_all(b"\n")?;
    }
    w.flush()
}

fn to_io<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}
