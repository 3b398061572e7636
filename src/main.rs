//! PhilVerify HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use philverify::classifier::{ClassifierConfig, load_classifier};
use philverify::config::Config;
use philverify::domain::DomainCredibility;
use philverify::embedding::EmbedderConfig;
use philverify::evidence::{EvidenceConfig, EvidenceFetcher, EvidencePipeline, SimilarityScorer};
use philverify::extract::UrlScraper;
use philverify::gateway::{AppState, create_router_with_state};
use philverify::history::{HistoryStore, JsonlHistory};
use philverify::nlp::NlpAnalyzer;
use philverify::scoring::{EngineParts, ScoringConfig, VerificationEngine};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ___ _    _ _ __   __       _  __
| _ \ |_ (_) |\ \ / /__ _ _(_)/ _|_  _
|  _/ ' \| | | \ V / -_) '_| |  _| || |
|_| |_||_|_|_|  \_/\___|_| |_|_|  \_, |
                                  |__/
        LAYER ONE. LAYER TWO. VERDICT.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    let scoring = ScoringConfig::from_env();
    scoring.validate()?;
    let evidence_config = EvidenceConfig::from_env();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        ml_weight = scoring.ml_weight,
        evidence_weight = scoring.evidence_weight,
        "PhilVerify starting"
    );

    let domains = Arc::new(match &config.domain_db_path {
        Some(path) => DomainCredibility::load(path)?,
        None => DomainCredibility::builtin(),
    });

    let embedder_config = match &config.embedding_model_path {
        Some(path) => EmbedderConfig::new(path.clone()),
        None => {
            tracing::warn!("No PHILVERIFY_EMBEDDING_MODEL_PATH configured, using Jaccard similarity");
            EmbedderConfig::default()
        }
    };
    let similarity = SimilarityScorer::probe(&embedder_config);

    let classifier_config = match &config.classifier_model_path {
        Some(path) => ClassifierConfig::new(path.clone()),
        None => ClassifierConfig::lexicon(),
    };
    let classifier = load_classifier(&classifier_config);

    if !evidence_config.has_sources() {
        tracing::warn!("No evidence sources enabled, Layer 2 will use fallback scores");
    }
    let fetcher = Arc::new(EvidenceFetcher::from_config(&evidence_config));
    let evidence = EvidencePipeline::new(
        fetcher,
        similarity,
        Arc::clone(&domains),
        evidence_config.max_results,
    );

    let history: Arc<dyn HistoryStore> = Arc::new(JsonlHistory::open(&config.history_path())?);

    let engine = Arc::new(VerificationEngine::new(EngineParts {
        nlp: NlpAnalyzer::new(),
        classifier,
        evidence,
        domains,
        scoring,
        history: Some(Arc::clone(&history)),
    }));
    tracing::info!(
        classifier = engine.classifier_name(),
        similarity = engine.similarity_strategy(),
        "Verification engine ready"
    );

    let state = AppState::new(
        engine,
        Arc::new(UrlScraper::default()),
        history,
        Some(config.data_dir.clone()),
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PhilVerify shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("PHILVERIFY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
