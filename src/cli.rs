//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "vrtcorpus", about = "recipe corpus generation tool.")]
/// Holds every command that is callable by the `vrtcorpus` command.
pub enum Vrtcorpus {
    #[structopt(about = "Annotate a recipe dump into VRT files")]
    Annotate(Annotate),
    #[structopt(about = "Merge VRT files into a single corpus file")]
    Merge(Merge),
}

#[derive(Debug, StructOpt)]
/// Annotate command and parameters.
pub struct Annotate {
    #[structopt(parse(from_os_str), help = "source dump location")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "destination location (recipes/ and comments/ are created there)"
    )]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "primary-model",
        help = "primary lexicon (form, tag, lemma TSV)"
    )]
    pub primary_model: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "fallback-model",
        help = "fallback lexicon (form, tag, lemma TSV)"
    )]
    pub fallback_model: PathBuf,
    #[structopt(
        short = "w",
        long = "workers",
        help = "number of workers. Defaults to the number of CPUs."
    )]
    pub workers: Option<usize>,
    #[structopt(
        long = "stagger-ms",
        default_value = "20000",
        help = "delay between two worker initializations, in milliseconds"
    )]
    pub stagger_ms: u64,
    #[structopt(
        long = "lenient-dates",
        help = "write unparsable dates as null dates instead of failing the document"
    )]
    pub lenient_dates: bool,
    #[structopt(
        long = "override-tag",
        help = "tag whose lemma is taken from the fallback model. Can be repeated. Defaults to VVFIN, VVINF, ADJD."
    )]
    pub override_tags: Vec<String>,
    #[structopt(
        long = "sentence-id-start",
        default_value = "0",
        help = "first sentence id"
    )]
    pub sentence_id_start: u64,
    #[structopt(
        long = "comment-id-start",
        default_value = "0",
        help = "first comment id"
    )]
    pub comment_id_start: u64,
    #[structopt(
        parse(from_os_str),
        long = "errors",
        default_value = "errors.txt",
        help = "failed documents file"
    )]
    pub errors: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Merge command and parameters.
pub struct Merge {
    #[structopt(parse(from_os_str), short = "i", long = "input", help = "VRT files location")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        default_value = "output/corpus.vrt",
        help = "corpus file. Compressed if it ends with .gz"
    )]
    pub dst: PathBuf,
    #[structopt(
        short = "e",
        long = "extension",
        default_value = ".vrt",
        help = "only merge files ending with this"
    )]
    pub extension: String,
    #[structopt(long = "trim", help = "drop the first and last line of every file")]
    pub trim: bool,
    #[structopt(long = "gzip", help = "gzip the output")]
    pub gzip: bool,
}
