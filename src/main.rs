use std::{process, sync::Arc};

use chemsketch::{
    application::{
        error::AppError,
        export::{ExportOptions, ExportService},
        ports::{Clipboard, Downloads, History, NameResolver, Notifier},
        render::{RenderController, RendererAdapter, SearchOutcome},
        url_sync::UrlSynchronizer,
    },
    config::{self, CopyTarget, ExportFlags},
    domain::{molecule::RenderRequest, snapshot::RenderOutcome},
    infra::{
        clipboard::TerminalClipboard, depiction::HttpDepictionBackend,
        downloads::DirectoryDownloads, history::InMemoryHistory, http,
        notifier::TerminalNotifier, pubchem::PubChemResolver, telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

mod shell;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let session = build_session(&settings)?;
    let command = cli_args.command.unwrap_or(config::Command::Shell);

    match command {
        config::Command::Open(args) => {
            let outcome = session.controller.load_initial().await;
            finish_one_shot(&session, outcome, &args.exports).await
        }
        config::Command::Render(args) => {
            let mut request = RenderRequest::new(args.smiles);
            if let Some(name) = args.name {
                request = request.with_name(name);
            }
            let outcome = session.controller.render(request).await;
            finish_one_shot(&session, outcome, &args.exports).await
        }
        config::Command::Search(args) => match session.controller.search(&args.name).await {
            SearchOutcome::Resolved { render, .. } => {
                finish_one_shot(&session, render, &args.exports).await
            }
            SearchOutcome::EmptyName | SearchOutcome::Failed(_) | SearchOutcome::Superseded => {
                let view = session.controller.view().await;
                let message = view
                    .search_status
                    .map(|status| status.message)
                    .unwrap_or_else(|| "search did not complete".to_string());
                Err(AppError::validation(message))
            }
        },
        config::Command::Shell => shell::run(&session).await,
    }
}

/// Everything one page session needs, wired from settings.
pub(crate) struct Session {
    pub(crate) controller: Arc<RenderController>,
    pub(crate) exports: ExportService,
}

fn build_session(settings: &config::Settings) -> Result<Session, AppError> {
    let history: Arc<dyn History> = Arc::new(InMemoryHistory::new(settings.session.page_url.clone()));
    let url_sync = UrlSynchronizer::new(history);

    let lookup_client = http::build_client(settings.pubchem.timeout).map_err(AppError::from)?;
    let resolver: Arc<dyn NameResolver> = Arc::new(PubChemResolver::new(
        lookup_client,
        settings.pubchem.base_url.clone(),
    ));

    let depiction_client =
        http::build_client(settings.depiction.timeout).map_err(AppError::from)?;
    let backend = Arc::new(HttpDepictionBackend::new(
        depiction_client,
        &settings.depiction,
    ));
    let renderer = Arc::new(RendererAdapter::new(backend));

    let controller = Arc::new(RenderController::new(
        renderer,
        resolver,
        url_sync.clone(),
    ));

    let clipboard: Arc<dyn Clipboard> = Arc::new(TerminalClipboard::from_path(
        settings.session.clipboard_file.clone(),
    ));
    let downloads: Arc<dyn Downloads> =
        Arc::new(DirectoryDownloads::new(settings.session.output_dir.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let exports = ExportService::new(
        url_sync,
        clipboard,
        downloads,
        notifier,
        ExportOptions {
            embed_link: settings.export.embed_link,
        },
    );

    info!(
        target = "chemsketch::session",
        provider = settings.depiction.provider.as_str(),
        page_url = %settings.session.page_url,
        output_dir = %settings.session.output_dir.display(),
        "Session ready"
    );

    Ok(Session {
        controller,
        exports,
    })
}

async fn finish_one_shot(
    session: &Session,
    outcome: RenderOutcome,
    flags: &ExportFlags,
) -> Result<(), AppError> {
    let snapshot = match outcome {
        RenderOutcome::Rendered(snapshot) => snapshot,
        RenderOutcome::Failed(failure) => {
            let view = session.controller.view().await;
            let message = view.error.unwrap_or_else(|| failure.to_string());
            return Err(AppError::validation(message));
        }
    };

    eprintln!("{}", snapshot.label);
    eprintln!("{}", session.controller.url_sync().share_url(&snapshot));

    let mut toasts = Vec::new();
    if flags.png {
        toasts.push(session.exports.download_png(&snapshot).await);
    }
    if flags.svg {
        toasts.push(session.exports.download_svg(&snapshot).await);
    }
    for target in &flags.copy {
        let toast = match target {
            CopyTarget::Svg => session.exports.copy_svg_text(&snapshot).await,
            CopyTarget::Embed => session.exports.copy_embed_snippet(&snapshot).await,
            CopyTarget::Url => session.exports.copy_share_url(&snapshot).await,
        };
        toasts.push(toast);
    }

    match toasts.into_iter().find(|toast| toast.is_error()) {
        Some(toast) => Err(AppError::unexpected(toast.text)),
        None => Ok(()),
    }
}
