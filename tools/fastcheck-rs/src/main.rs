#[path = "../../dict-generate/src/json_io.rs"] // shared reference-JSON DTO
mod json_io;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use log::{debug, info, warn};
use serde_json::json;

use fastcheck_fmmseg::delimiter_set::{is_ignorable, is_space};
use fastcheck_fmmseg::scanner::SkipFn;
use fastcheck_fmmseg::utils::find_max_utf8_length;
use fastcheck_fmmseg::FastCheck;

const MODE_LIST: [&str; 3] = ["check", "find", "replace"];
const SKIP_LIST: [&str; 3] = ["none", "space", "delimiters"];
const LOG_CLIP_BYTES: usize = 48;

fn read_input(input: &mut dyn Read, is_console: bool) -> Result<Vec<u8>, io::Error> {
    let mut buffer = Vec::new();

    if is_console {
        // Read chunks of data when input is from the console
        let mut chunk = [0; 1024]; // 1 KB chunks
        loop {
            match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(bytes_read) => buffer.extend_from_slice(&chunk[..bytes_read]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    } else {
        input.read_to_end(&mut buffer)?;
    }

    Ok(buffer)
}

fn decode_input(buffer: &[u8], in_enc: &str) -> Result<String, io::Error> {
    match in_enc {
        "UTF-8" => Ok(String::from_utf8_lossy(buffer).into_owned()),
        _ => {
            let encoding = Encoding::for_label(in_enc.as_bytes()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unsupported input encoding: {}", in_enc),
                )
            })?;
            let mut decoder = DecodeReaderBytesBuilder::new()
                .encoding(Some(encoding))
                .build(buffer);
            let mut decoded = String::new();
            decoder.read_to_string(&mut decoded)?;
            Ok(decoded)
        }
    }
}

fn encode_and_write_output(
    output_str: &str,
    out_enc: &str,
    output: &mut dyn Write,
) -> Result<(), io::Error> {
    match out_enc {
        "UTF-8" => write!(output, "{}", output_str),
        _ => {
            let encoding = Encoding::for_label(out_enc.as_bytes()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unsupported output encoding: {}", out_enc),
                )
            })?;
            let (encoded_bytes, _, _) = encoding.encode(output_str);
            output.write_all(&encoded_bytes)
        }
    }
}

fn remove_utf8_bom(input: &mut Vec<u8>) {
    // UTF-8 BOM: EF BB BF
    if input.starts_with(&[0xEF, 0xBB, 0xBF]) {
        input.drain(0..3);
    }
}

fn skip_predicate(mode: &str) -> SkipFn<'static> {
    match mode {
        "space" => Some(&is_space),
        "delimiters" => Some(&is_ignorable),
        _ => None,
    }
}

/// Opens a word list (`.txt` and anything else), a `.zstd` / `.cbor` snapshot,
/// or a reference `.json` written by dict-generate.
fn load_checker(path: &str, ignore_case: bool) -> Result<FastCheck, Box<dyn std::error::Error>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let checker = match extension.as_deref() {
        Some("zstd") | Some("zst") => FastCheck::load_compressed(path)?,
        Some("cbor") => FastCheck::deserialize_from_cbor(path)?,
        Some("json") => FastCheck::from_index(json_io::read_reference_json(BufReader::new(
            File::open(path)?,
        ))?),
        _ => FastCheck::from_word_file(path, ignore_case)?,
    };

    if checker.ignore_case() != ignore_case {
        warn!(
            "snapshot {} was built with ignore_case={}; --ignore-case is ignored",
            path,
            checker.ignore_case()
        );
    }
    Ok(checker)
}

fn clip(word: &str) -> &str {
    &word[..find_max_utf8_length(word, LOG_CLIP_BYTES)]
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m";
    const RESET: &str = "\x1B[0m";

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("FastCheck Rust")
        .arg(
            Arg::new("dict")
                .short('d')
                .long("dict")
                .value_name("file")
                .required(true)
                .help("Word list (.txt, one entry per line) or snapshot (.zstd|.cbor)."),
        )
        .arg(
            Arg::new("whitelist")
                .short('w')
                .long("whitelist")
                .value_name("file")
                .help("Whitelist file, one word per line."),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .help("Read original text from <file>."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write result to <file>."),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("mode")
                .default_value("replace")
                .help("Operation: [check|find|replace]"),
        )
        .arg(
            Arg::new("replacement")
                .short('r')
                .long("replacement")
                .value_name("char")
                .default_value("*")
                .help("Replacement character for replace mode"),
        )
        .arg(
            Arg::new("ignore_case")
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Case-insensitive matching (word lists only)"),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("set")
                .default_value("none")
                .help("Ignorable characters: [none|space|delimiters]"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("format")
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Result format for check/find: [text|json]"),
        )
        .arg(
            Arg::new("in_enc")
                .long("in-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for input: UTF-8|GB2312|GBK|gb18030|BIG5"),
        )
        .arg(
            Arg::new("out_enc")
                .long("out-enc")
                .value_name("encoding")
                .default_value("UTF-8")
                .help("Encoding for output: UTF-8|GB2312|GBK|gb18030|BIG5"),
        )
        .about(format!(
            "{BLUE}FastCheck Rust: Command Line Sensitive Word Checker{RESET}"
        ))
        .get_matches();

    let dict_file = matches.get_one::<String>("dict").ok_or("missing --dict")?;
    let input_file = matches.get_one::<String>("input");
    let output_file = matches.get_one::<String>("output");
    let ignore_case = matches.get_flag("ignore_case");
    let json_format = matches.get_one::<String>("format").map(String::as_str) == Some("json");
    let in_enc = matches.get_one::<String>("in_enc").map_or("UTF-8", String::as_str);
    let out_enc = matches.get_one::<String>("out_enc").map_or("UTF-8", String::as_str);

    let mode = matches.get_one::<String>("mode").map_or("replace", String::as_str);
    if !MODE_LIST.contains(&mode) {
        eprintln!("Invalid mode: {}", mode);
        eprintln!("Valid Modes: {:?}", MODE_LIST);
        return Ok(ExitCode::from(2));
    }

    let skip_mode = matches.get_one::<String>("skip").map_or("none", String::as_str);
    if !SKIP_LIST.contains(&skip_mode) {
        eprintln!("Invalid skip set: {}", skip_mode);
        eprintln!("Valid Skip Sets: {:?}", SKIP_LIST);
        return Ok(ExitCode::from(2));
    }
    let skip = skip_predicate(skip_mode);

    let replacement_arg = matches.get_one::<String>("replacement").map_or("*", String::as_str);
    let mut replacement_chars = replacement_arg.chars();
    let replacement = match (replacement_chars.next(), replacement_chars.next()) {
        (Some(c), None) => c,
        _ => {
            eprintln!("Replacement must be exactly one character: {:?}", replacement_arg);
            return Ok(ExitCode::from(2));
        }
    };

    let checker = load_checker(dict_file, ignore_case)?;
    if let Some(whitelist_file) = matches.get_one::<String>("whitelist") {
        let count = checker.load_whitelist(BufReader::new(File::open(whitelist_file)?))?;
        debug!("whitelist {}: {} words", whitelist_file, count);
    }
    info!(
        "dictionary {}: {} entries, ignore_case={}",
        dict_file,
        checker.len(),
        checker.ignore_case()
    );

    // Determine input source
    let mut input: Box<dyn Read> = match input_file {
        Some(file_name) => Box::new(BufReader::new(File::open(file_name)?)),
        None => {
            if io::stdin().is_terminal() {
                println!("{BLUE}Input text to check, <ctrl-z> or <ctrl-d> to submit:{RESET}");
            }
            Box::new(io::stdin())
        }
    };

    let is_console = input_file.is_none();
    let mut buffer = read_input(&mut *input, is_console)?;
    if in_enc == "UTF-8" {
        remove_utf8_bom(&mut buffer);
    }
    let input_str = decode_input(&buffer, in_enc)?;

    let mut exit_code = ExitCode::SUCCESS;
    let output_str = match mode {
        "check" => {
            let (word, found) = checker.has_word(&input_str, skip);
            if found {
                info!("first match: {}", clip(&word));
                exit_code = ExitCode::from(1);
            }
            if json_format {
                format!("{}\n", json!({ "found": found, "word": word }))
            } else if found {
                format!("found: {}\n", word)
            } else {
                "clean\n".to_string()
            }
        }
        "find" => {
            let words = checker.find(&input_str, skip);
            for word in &words {
                debug!("match: {}", clip(word));
            }
            if json_format {
                format!("{}\n", json!({ "count": words.len(), "matches": words }))
            } else {
                words.iter().map(|w| format!("{}\n", w)).collect()
            }
        }
        _ => checker.replace(&input_str, replacement, skip),
    };

    let mut output = BufWriter::new(match output_file {
        Some(file_name) => Box::new(File::create(file_name)?) as Box<dyn Write>,
        None => Box::new(io::stdout()) as Box<dyn Write>,
    });
    encode_and_write_output(&output_str, out_enc, &mut output)?;
    output.flush()?;

    if let Some(output_file) = output_file {
        eprintln!(
            "{BLUE}FastCheck completed ({mode}): {} -> {}{RESET}",
            input_file.map_or("<stdin>", String::as_str),
            output_file
        );
    }

    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields `Interrupted` once, then one chunk of data, then `fail` (if any).
    struct FlakyReader {
        interrupted: bool,
        data: Option<&'static [u8]>,
        fail: Option<io::ErrorKind>,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            if let Some(data) = self.data.take() {
                buf[..data.len()].copy_from_slice(data);
                return Ok(data.len());
            }
            match self.fail {
                Some(kind) => Err(kind.into()),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn console_read_retries_interrupted() {
        let mut reader = FlakyReader {
            interrupted: false,
            data: Some(b"damn it"),
            fail: None,
        };
        assert_eq!(read_input(&mut reader, true).unwrap(), b"damn it");
    }

    #[test]
    fn console_read_error_is_propagated() {
        let mut reader = FlakyReader {
            interrupted: false,
            data: Some(b"partial"),
            fail: Some(io::ErrorKind::BrokenPipe),
        };
        let err = read_input(&mut reader, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn json_dictionary_is_loaded_by_extension() {
        let dir = std::env::temp_dir().join(format!("fastcheck-rs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dict.json");

        let mut index = fastcheck_fmmseg::dictionary_lib::WordIndex::new(false);
        index.insert("damn").unwrap();
        index.insert("heck").unwrap();
        let dto = json_io::WordIndexSerde::from(&index);
        std::fs::write(&path, serde_json::to_vec(&dto).unwrap()).unwrap();

        let checker = load_checker(path.to_str().unwrap(), false).unwrap();
        assert_eq!(checker.find("damn heck", None), vec!["damn", "heck"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
