// LexiScan: rule-based text analysis over local documents.
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use walkdir::WalkDir;

mod nlp;

use nlp::doc::Doc;
use nlp::frequency::FrequencyTable;
use nlp::pipeline::Pipeline;
use nlp::{sentences, tagger};

#[derive(Parser)]
#[command(
    name = "LexiScan",
    about = "Rule-based text analysis — tokens, sentences, lemmas, tags, word frequencies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every token with its attribute flags
    Tokens {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        text: Option<String>,
        /// Extra infix pattern for the tokenizer, e.g. "@" (repeatable)
        #[arg(long)]
        infix: Vec<String>,
        /// Include byte offsets
        #[arg(long)]
        offsets: bool,
    },
    /// Split the input into sentences
    Sents {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        text: Option<String>,
        /// Treat this token as an extra sentence delimiter, e.g. "..."
        #[arg(short, long)]
        delimiter: Option<String>,
    },
    /// Show tokens whose lemma differs from their surface form
    Lemmas {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        text: Option<String>,
    },
    /// Part-of-speech tags with explanations
    Tags {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        text: Option<String>,
    },
    /// Word frequency table: top-k words and words occurring once
    Freq {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        text: Option<String>,
        #[arg(short, long, default_value_t = 5)]
        k: usize,
        /// Count stop words too
        #[arg(long)]
        keep_stops: bool,
        /// Treat this word as an extra stop word (repeatable)
        #[arg(long)]
        extra_stop: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the stop word lexicon
    Stopwords {
        /// Show only the first n words
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Aggregate word frequencies across every document in a directory
    Scan {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "lexiscan_freq.json")]
        out: PathBuf,
        #[arg(short, long, default_value_t = 25)]
        k: usize,
    },
}

#[derive(Serialize)]
struct FreqEntry {
    word: String,
    count: usize,
}

#[derive(Serialize)]
struct FreqReport {
    total: usize,
    distinct: usize,
    top: Vec<FreqEntry>,
    hapaxes: Vec<String>,
}

#[derive(Serialize)]
struct ScanReport {
    files: usize,
    total: usize,
    distinct: usize,
    top: Vec<FreqEntry>,
}

fn read_text_file(p: &Path) -> Result<String> {
    let mut s = String::new();
    let mut f = File::open(p)?;
    f.read_to_string(&mut s)?;
    Ok(s)
}

fn read_file_content(p: &Path) -> Result<String> {
    let ext = p.extension().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "txt" | "md" | "csv" | "json" => read_text_file(p),
        "pdf" => pdf_extract::extract_text(p).map_err(|e| anyhow!("PDF extraction failed: {}", e)),
        _ => Err(anyhow!("Unsupported file format: {}", ext)),
    }
}

fn load_input(file: &Option<PathBuf>, text: &Option<String>) -> Result<String> {
    match (file, text) {
        (Some(path), _) => read_file_content(path),
        (None, Some(t)) => Ok(t.clone()),
        (None, None) => Err(anyhow!("provide --file or --text")),
    }
}

fn frequency_from_doc(doc: &Doc, keep_stops: bool) -> FrequencyTable {
    FrequencyTable::from_words(
        doc.tokens
            .iter()
            .filter(|t| !t.is_punct && (keep_stops || !t.is_stop))
            .map(|t| t.text.as_str()),
    )
}

fn freq_report(table: &FrequencyTable, k: usize) -> FreqReport {
    FreqReport {
        total: table.total(),
        distinct: table.len(),
        top: table
            .most_common(k)
            .into_iter()
            .map(|(word, count)| FreqEntry { word, count })
            .collect(),
        hapaxes: table.hapaxes(),
    }
}

fn cmd_tokens(
    file: &Option<PathBuf>,
    text: &Option<String>,
    infixes: &[String],
    offsets: bool,
) -> Result<()> {
    let input = load_input(file, text)?;
    let mut pipeline = Pipeline::load("en")?;
    for pattern in infixes {
        pipeline.tokenizer_mut().add_infix(pattern)?;
    }
    let doc = pipeline.process(&input);

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    if offsets {
        writeln!(
            stdout,
            "{:<24}{:<10}{:<12}{:<12}{}",
            "Text with whitespace", "Offset", "Is alpha?", "Is punct?", "Is stop?"
        )?;
    } else {
        writeln!(
            stdout,
            "{:<24}{:<12}{:<12}{}",
            "Text with whitespace", "Is alpha?", "Is punct?", "Is stop?"
        )?;
    }
    for token in &doc.tokens {
        if token.is_stop {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        }
        let shown = token.text_with_ws().replace('\n', " ");
        if offsets {
            writeln!(
                stdout,
                "{:<24}{:<10}{:<12}{:<12}{}",
                shown, token.idx, token.is_alpha, token.is_punct, token.is_stop
            )?;
        } else {
            writeln!(
                stdout,
                "{:<24}{:<12}{:<12}{}",
                shown, token.is_alpha, token.is_punct, token.is_stop
            )?;
        }
        stdout.reset()?;
    }
    Ok(())
}

fn cmd_sents(
    file: &Option<PathBuf>,
    text: &Option<String>,
    delimiter: &Option<String>,
) -> Result<()> {
    let input = load_input(file, text)?;
    let mut pipeline = Pipeline::load("en")?;
    if let Some(d) = delimiter {
        pipeline.add_component_before(
            "custom_boundaries",
            "sentencizer",
            sentences::delimiter_boundary(d),
        )?;
    }
    let doc = pipeline.process(&input);
    for sent in doc.sentences() {
        println!("{}", Doc::span_text(sent));
    }
    Ok(())
}

fn cmd_lemmas(file: &Option<PathBuf>, text: &Option<String>) -> Result<()> {
    let input = load_input(file, text)?;
    let doc = Pipeline::load("en")?.process(&input);
    for token in &doc.tokens {
        if token.text != token.lemma {
            println!("{:>20} : {}", token.text, token.lemma);
        }
    }
    Ok(())
}

fn cmd_tags(file: &Option<PathBuf>, text: &Option<String>) -> Result<()> {
    let input = load_input(file, text)?;
    let doc = Pipeline::load("en")?.process(&input);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for token in &doc.tokens {
        write!(stdout, "{:<16}", token.text)?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{:<8}", token.tag)?;
        stdout.reset()?;
        writeln!(
            stdout,
            "{:<8}{}",
            token.pos,
            tagger::explain(&token.tag).unwrap_or("-")
        )?;
    }
    Ok(())
}

fn cmd_freq(
    file: &Option<PathBuf>,
    text: &Option<String>,
    k: usize,
    keep_stops: bool,
    extra_stops: &[String],
    json: bool,
) -> Result<()> {
    let input = load_input(file, text)?;
    let mut pipeline = Pipeline::load("en")?;
    if !extra_stops.is_empty() {
        let words: Vec<&str> = extra_stops.iter().map(|s| s.as_str()).collect();
        pipeline.add_stop_words(&words);
    }
    let doc = pipeline.process(&input);
    let table = frequency_from_doc(&doc, keep_stops);
    if json {
        println!("{}", serde_json::to_string_pretty(&freq_report(&table, k))?);
        return Ok(());
    }
    println!("Top {} words:", k);
    for (word, count) in table.most_common(k) {
        println!("{:>6}  {}", count, word);
    }
    let hapaxes = table.hapaxes();
    println!("\nWords occurring once ({}):", hapaxes.len());
    for word in hapaxes {
        println!("        {}", word);
    }
    Ok(())
}

fn cmd_stopwords(n: Option<usize>) {
    println!("{} stop words", nlp::stopwords::count());
    let mut words: Vec<&str> = nlp::stopwords::iter().collect();
    words.sort_unstable();
    for word in words.iter().take(n.unwrap_or(usize::MAX)) {
        println!("{}", word);
    }
}

fn scan_dir(dir: &Path, out: &Path, k: usize) -> Result<()> {
    let allowed_exts = ["txt", "md", "csv", "json", "pdf"];
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| allowed_exts.contains(&ext))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}",
        )?
        .progress_chars("=>-"),
    );

    let pipeline = Pipeline::load("en")?;
    let merged = Mutex::new(FrequencyTable::new());
    files.par_iter().for_each(|p| {
        let text = read_file_content(p).unwrap_or_else(|_| String::new());
        let doc = pipeline.process(&text);
        let local = frequency_from_doc(&doc, false);
        merged.lock().merge(&local);
        pb.inc(1);
    });
    pb.finish_with_message("scanned");

    let table = merged.into_inner();
    let report = ScanReport {
        files: files.len(),
        total: table.total(),
        distinct: table.len(),
        top: table
            .most_common(k)
            .into_iter()
            .map(|(word, count)| FreqEntry { word, count })
            .collect(),
    };
    serde_json::to_writer_pretty(File::create(out)?, &report)?;
    println!("Wrote frequency report to {}", out.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Tokens {
            file,
            text,
            infix,
            offsets,
        } => cmd_tokens(&file, &text, &infix, offsets)?,
        Commands::Sents {
            file,
            text,
            delimiter,
        } => cmd_sents(&file, &text, &delimiter)?,
        Commands::Lemmas { file, text } => cmd_lemmas(&file, &text)?,
        Commands::Tags { file, text } => cmd_tags(&file, &text)?,
        Commands::Freq {
            file,
            text,
            k,
            keep_stops,
            extra_stop,
            json,
        } => cmd_freq(&file, &text, k, keep_stops, &extra_stop, json)?,
        Commands::Stopwords { n } => cmd_stopwords(n),
        Commands::Scan { dir, out, k } => scan_dir(&dir, &out, k)?,
    }
    Ok(())
}
