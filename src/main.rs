use clap::Parser;
use skyscope::config::Config;
use skyscope::location::{LocationResolver, SearchBox};
use skyscope::render::{render_suggestions, render_view};
use skyscope::sky::{HttpSkyService, QueryPhase, SkyQueryController, SkyService};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// SkyScope — what is up in the sky right now?
///
/// Resolves an observation site from a known city name or a "lat,lon" pair
/// and lists the objects the sky service reports as visible there.
///
/// Examples:
///   skyscope Paris
///   skyscope "59.33, 18.07"
///   skyscope --suggest on
///   skyscope --interactive
///   skyscope --serve --port 8080
#[derive(Parser)]
#[command(name = "skyscope", version, about, long_about = None)]
struct Cli {
    /// City name or "lat,lon". Example: skyscope "New York"
    #[arg(index = 1, allow_hyphen_values = true)]
    location: Option<String>,

    /// List directory cities containing this text and exit.
    #[arg(long, short = 's')]
    suggest: Option<String>,

    /// Base URL of the sky object service (overrides config and SKYSCOPE_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Print the query state as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Read locations line by line from stdin.
    /// "?text" lists suggestions, "@Name" selects one, anything else is submitted.
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Run the local HTTP API instead.
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().with_api_url(cli.api_url.clone());
    let resolver = LocationResolver::new();

    if let Some(ref partial) = cli.suggest {
        print!("{}", render_suggestions(&resolver.suggest(partial)));
        return ExitCode::SUCCESS;
    }

    let service: Arc<dyn SkyService> = Arc::new(HttpSkyService::new(&config.api_url));

    if cli.serve {
        return match skyscope::server::start(&cli.host, cli.port, service).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Server error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut controller = SkyQueryController::with_shared(service);
    let mut search = SearchBox::new(resolver);

    if cli.interactive {
        return interactive(&mut search, &mut controller, cli.json).await;
    }

    let Some(location) = cli.location else {
        eprintln!("Error: No location specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  skyscope Paris");
        eprintln!("  skyscope \"48.85, 2.35\"");
        eprintln!("  skyscope --interactive");
        return ExitCode::from(1);
    };

    search.on_input(&location);
    let at = match search.submit() {
        Ok(at) => at,
        Err(e) => {
            eprintln!("Error: {}", e);
            let suggestions = resolver.suggest(&location);
            if !suggestions.is_empty() {
                eprintln!("Did you mean:");
                eprint!("{}", render_suggestions(&suggestions));
            }
            return ExitCode::from(1);
        }
    };

    eprintln!("  \u{1F4CD} {}", at);
    let state = controller.run(at).await;
    emit(&search, &state, cli.json);

    if state.phase == QueryPhase::Failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

async fn interactive(search: &mut SearchBox, controller: &mut SkyQueryController, json: bool) -> ExitCode {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("  Enter a city or \"lat,lon\" (?text suggests, @Name selects, empty line quits)");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }

        let resolved = if let Some(partial) = line.strip_prefix('?') {
            search.on_input(partial);
            print!("{}", render_suggestions(search.visible_suggestions()));
            continue;
        } else if let Some(name) = line.strip_prefix('@') {
            search.select(name)
        } else {
            search.on_input(line);
            search.submit()
        };

        match resolved {
            Ok(at) => {
                controller.submit(at);
                eprintln!("  \u{1F4CD} {}", at);
                let state = controller.settle().await;
                emit(search, &state, json);
            }
            // Input errors leave the previous query result on screen.
            Err(_) => emit(search, &controller.snapshot(), json),
        }
    }
    ExitCode::SUCCESS
}

fn emit(search: &SearchBox, state: &skyscope::sky::QueryState, json: bool) {
    if json {
        match serde_json::to_string_pretty(state) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Error: {}", e),
        }
        if let Some(err) = search.input_error() {
            eprintln!("Error: {}", err);
        }
    } else {
        print!("{}", render_view(search.input_error(), state));
    }
}
