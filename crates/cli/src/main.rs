mod console_writer;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use speechcheck_core::audit::domain::message_writer::MessageWriter;
use speechcheck_core::audit::domain::transcript_auditor::TranscriptAuditor;
use speechcheck_core::config::AuditConfig;
use speechcheck_core::matching::infrastructure::levenshtein_comparer::LevenshteinComparer;
use speechcheck_core::pipeline::audit_media_use_case::AuditMediaUseCase;
use speechcheck_core::transcript::domain::transcript_store::TranscriptStore;
use speechcheck_core::transcript::infrastructure::file_transcript_store::FileTranscriptStore;
use speechcheck_core::transcription::domain::media_transcriber::MediaTranscriber;
use speechcheck_core::transcription::infrastructure::ffmpeg_audio_preparer::FfmpegAudioPreparer;
use speechcheck_core::transcription::infrastructure::ffmpeg_whisper_transcriber::FfmpegWhisperTranscriber;
use speechcheck_core::transcription::infrastructure::whisper_cli_transcriber::WhisperCliTranscriber;

use console_writer::ConsoleWriter;

/// Checks recorded speech for desired and prohibited phrases.
#[derive(Parser)]
#[command(name = "speechcheck", version)]
struct Cli {
    /// Media file (video or audio) to check.
    input: PathBuf,

    /// Configuration file; a commented template is written if it is missing.
    #[arg(long, default_value = "speechcheck.toml")]
    config: PathBuf,

    /// List every found occurrence under its phrase, regardless of the
    /// configuration.
    #[arg(long)]
    details: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let writer: Arc<dyn MessageWriter> = Arc::new(ConsoleWriter::new(!cli.no_color));
    writer.write_header(&format!("speechcheck {}", env!("CARGO_PKG_VERSION")));

    if let Err(e) = run(cli, Arc::clone(&writer)) {
        writer.write_internal_error(&format!("Error: {e}"));
        process::exit(1);
    }
}

fn run(cli: Cli, writer: Arc<dyn MessageWriter>) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let config = AuditConfig::load_or_init(&cli.config)?;
    log::info!("Configuration loaded from {}", cli.config.display());
    let show_details = cli.details || config.show_details_in_report;

    let transcriber = build_transcriber(&config);
    let auditor = TranscriptAuditor::new(
        config.desired_phrases.clone(),
        config.prohibited_phrases.clone(),
        show_details,
        Box::new(LevenshteinComparer::new(config.policy())),
        Arc::clone(&writer),
    );

    let mut use_case = AuditMediaUseCase::new(transcriber, auditor);
    use_case.run(&cli.input)
}

fn build_transcriber(config: &AuditConfig) -> Box<dyn MediaTranscriber> {
    log::info!(
        "Using the {} model, language {}",
        config.model,
        config.language
    );
    let preparer = FfmpegAudioPreparer::new(
        config.ffmpeg_path.clone(),
        config.ffmpeg_zip_url.clone(),
        config.output_dir.clone(),
        config.forced_audio_extraction,
    );
    let store: Box<dyn TranscriptStore> = Box::new(FileTranscriptStore::new(&config.output_dir));
    let transcriber = WhisperCliTranscriber::new(
        config.whisper_path.clone(),
        config.whisper_dir.clone(),
        config.model,
        config.language.clone(),
        config.forced_transcription,
        store,
    );
    Box::new(FfmpegWhisperTranscriber::new(
        Box::new(preparer),
        Box::new(transcriber),
    ))
}
