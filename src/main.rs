use application::command::stage_records::RecordStager;
use application::pipeline::{Pipeline, PipelineOptions, PipelineReport};
use infra::config::AppConfigImpl;
use infra::repository::sql::{connect, SqlStore};
use infra::{JsonRecordReader, LocalSourceCatalog};
use log::{error, info};
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::error::Error;
use std::sync::Arc;

// 配置日志同时输出到控制台和文件
fn init_logging(log_file: &str) -> Result<(), Box<dyn Error>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}",
        )))
        .build(log_file)?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build(
            "stdout",
            Box::new(ConsoleAppender::builder().build()),
        ))
        .build(
            Root::builder()
                .appender("file")
                .appender("stdout")
                .build(log_level.parse().unwrap_or(log::LevelFilter::Info)),
        )?;

    log4rs::init_config(config)?;
    Ok(())
}

fn log_report(report: &PipelineReport) {
    info!(
        "Staging: {} files seen, {} staged, {} skipped",
        report.staging.files_seen,
        report.staging.files_staged,
        report.staging.files_skipped()
    );
    info!("Artists: {}", report.artists.artists);
    info!(
        "Locations: {} ({} ambiguous latitudes, {} ambiguous longitudes)",
        report.locations.locations,
        report.locations.ambiguous_latitude,
        report.locations.ambiguous_longitude
    );
    info!(
        "Artist locations: {} linked, {} artists skipped",
        report.links.links, report.links.skipped_artists
    );
    info!(
        "Albums: {} inserted, {} keys skipped",
        report.albums.albums, report.albums.skipped_keys
    );
    info!(
        "Songs: {} inserted, {} without artist, {} without album",
        report.songs.songs, report.songs.unresolved_artist, report.songs.unresolved_album
    );
    if report.staging_cleared {
        info!("Staging tables cleared");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cfg = AppConfigImpl::load()?;
    init_logging(&cfg.log_file)?;
    info!(
        "Loading {} files from {}",
        cfg.source_extension,
        cfg.data_dir.display()
    );

    let db = connect(&cfg.database_url, cfg.max_connections).await?;
    infra::schema::create_all(&db, &cfg.schema).await?;

    let stager = RecordStager::new(
        Arc::new(LocalSourceCatalog::new(&cfg.data_dir, &cfg.source_extension)),
        Arc::new(JsonRecordReader::new()),
    )
    .with_fail_fast(cfg.pipeline.fail_fast)
    .with_progress_every(cfg.pipeline.progress_every);

    let store = Arc::new(SqlStore::new(db.clone(), cfg.schema.clone()));
    let pipeline = Pipeline::new(store, stager).with_options(PipelineOptions {
        clear_staging: cfg.pipeline.clear_staging,
    });

    let result = pipeline.run().await;
    db.close().await?;

    match result {
        Ok(report) => {
            log_report(&report);
            Ok(())
        }
        Err(e) => {
            error!("ETL run failed: {}", e);
            Err(e.into())
        }
    }
}
