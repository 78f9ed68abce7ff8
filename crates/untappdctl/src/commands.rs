use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::response::IntoResponse;
use axum::Router;
use tokio::sync::mpsc;
use untappd::http::ReqwestClient;
use untappd::oauth::OAuthHandler;
use untappd::{CheckinRequest, Client, Credentials, Response, ResponseMeta, DEFAULT_LIMIT};

use crate::cli::{
    distance, AuthCommand, BeerCommand, BreweryCommand, CheckinArgs, Cli, Command, LocalCommand,
    UserCommand, VenueCommand,
};
use crate::config::Config;
use crate::print::Printer;

/// Path the OAuth redirect is served on during `auth login`
const CALLBACK_PATH: &str = "/auth";

/// Page size of the badges listing when none is given
const BADGE_LIMIT: u32 = 50;

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = merge(Config::load_from(&config_path)?, &cli);
    let mut out = Printer::new(std::io::stdout(), cli.json);

    match cli.command {
        Command::User(cmd) => user(&build_client(&config)?, cmd, &mut out).await,
        Command::Beer(cmd) => beer(&build_client(&config)?, cmd, &mut out).await,
        Command::Brewery(cmd) => brewery(&build_client(&config)?, cmd, &mut out).await,
        Command::Venue(cmd) => venue(&build_client(&config)?, cmd, &mut out).await,
        Command::Local(cmd) => local(&build_client(&config)?, cmd, &mut out).await,
        Command::Auth(cmd) => auth(&config, &config_path, cmd, &mut out).await,
    }
}

/// Applies flag and environment values over the config file
fn merge(mut config: Config, cli: &Cli) -> Config {
    if let Some(client_id) = &cli.client_id {
        config.client_id.clone_from(client_id);
    }
    if let Some(client_secret) = &cli.client_secret {
        config.client_secret.clone_from(client_secret);
    }
    if let Some(access_token) = &cli.access_token {
        config.access_token.clone_from(access_token);
    }
    config
}

fn build_client(config: &Config) -> Result<Client> {
    let credentials =
        Credentials::resolve(&config.client_id, &config.client_secret, &config.access_token)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_sec))
        .build()
        .context("Failed to build HTTP client")?;

    let mut client = Client::with_http_client(credentials, ReqwestClient::from_client(http));
    if let Some(user_agent) = &config.user_agent {
        client = client.with_user_agent(user_agent)?;
    }

    Ok(client)
}

/// Awaits one API call, logging the remaining rate limit either way
async fn call<T>(request: impl Future<Output = untappd::Result<Response<T>>>) -> Result<T> {
    match request.await {
        Ok(res) => {
            log_rate_limit(&res.meta);
            Ok(res.data)
        }
        Err(err) => {
            if let Some(meta) = err.response() {
                log_rate_limit(meta);
            }
            Err(err.into())
        }
    }
}

fn log_rate_limit(meta: &ResponseMeta) {
    if let Some(remaining) = meta.rate_limit_remaining() {
        tracing::info!(remaining, limit = meta.rate_limit(), "X-Ratelimit-Remaining");
    }
}

async fn user(client: &Client, cmd: UserCommand, out: &mut Printer<impl Write>) -> Result<()> {
    let users = client.user();

    match cmd {
        UserCommand::Info { username } => {
            let user = call(users.info(&username, false)).await?;
            out.users(&[user], true)
        }
        UserCommand::Friends { username, page } => {
            let friends = call(users.friends_offset_limit(
                &username,
                page.offset,
                page.limit_or(DEFAULT_LIMIT),
            ))
            .await?;
            out.users(&friends.items, false)
        }
        UserCommand::Badges { username, page } => {
            let badges = call(users.badges_offset_limit(
                &username,
                page.offset,
                page.limit_or(BADGE_LIMIT),
            ))
            .await?;
            out.badges(&badges.items)
        }
        UserCommand::Beers {
            username,
            page,
            sort,
        } => {
            let beers = call(users.beers_offset_limit_sort(
                &username,
                page.offset,
                page.limit_or(DEFAULT_LIMIT),
                sort.sort,
            ))
            .await?;
            out.beers(&beers.items)
        }
        UserCommand::Wishlist {
            username,
            page,
            sort,
        } => {
            let beers = call(users.wish_list_offset_limit_sort(
                &username,
                page.offset,
                page.limit_or(DEFAULT_LIMIT),
                sort.sort,
            ))
            .await?;
            out.beers(&beers.items)
        }
        UserCommand::Checkins { username, range } => {
            let checkins = call(users.checkins_min_max_id_limit(
                &username,
                range.min_id,
                range.max_id,
                range.limit,
            ))
            .await?;
            out.checkins(&checkins.items)
        }
    }
}

async fn beer(client: &Client, cmd: BeerCommand, out: &mut Printer<impl Write>) -> Result<()> {
    let beers = client.beer();

    match cmd {
        BeerCommand::Info { id } => {
            let beer = call(beers.info(id, false)).await?;
            out.beers(&[beer])
        }
        BeerCommand::Search { query, page, sort } => {
            let results = call(beers.search_offset_limit_sort(
                &query,
                page.offset,
                page.limit_or(DEFAULT_LIMIT),
                sort.sort,
            ))
            .await?;
            out.beers(&results.items)
        }
        BeerCommand::Checkins { id, range } => {
            let checkins =
                call(beers.checkins_min_max_id_limit(id, range.min_id, range.max_id, range.limit))
                    .await?;
            out.checkins(&checkins.items)
        }
    }
}

async fn brewery(client: &Client, cmd: BreweryCommand, out: &mut Printer<impl Write>) -> Result<()> {
    let breweries = client.brewery();

    match cmd {
        BreweryCommand::Info { id } => {
            let brewery = call(breweries.info(id, false)).await?;
            out.breweries(&[brewery])
        }
        BreweryCommand::Search { query, page } => {
            let results = call(breweries.search_offset_limit(
                &query,
                page.offset,
                page.limit_or(DEFAULT_LIMIT),
            ))
            .await?;
            out.breweries(&results.items)
        }
        BreweryCommand::Checkins { id, range } => {
            let checkins = call(breweries.checkins_min_max_id_limit(
                id,
                range.min_id,
                range.max_id,
                range.limit,
            ))
            .await?;
            out.checkins(&checkins.items)
        }
    }
}

async fn venue(client: &Client, cmd: VenueCommand, out: &mut Printer<impl Write>) -> Result<()> {
    let venues = client.venue();

    match cmd {
        VenueCommand::Info { id } => {
            let venue = call(venues.info(id, false)).await?;
            out.venues(&[venue])
        }
        VenueCommand::Checkins { id, range } => {
            let checkins =
                call(venues.checkins_min_max_id_limit(id, range.min_id, range.max_id, range.limit))
                    .await?;
            out.checkins(&checkins.items)
        }
    }
}

async fn local(client: &Client, cmd: LocalCommand, out: &mut Printer<impl Write>) -> Result<()> {
    match cmd {
        LocalCommand::Checkins {
            latitude,
            longitude,
            range,
            radius,
            km,
        } => {
            let checkins = call(client.local().checkins_min_max_id_limit_radius(
                latitude,
                longitude,
                range.min_id,
                range.max_id,
                range.limit,
                radius,
                distance(km),
            ))
            .await?;
            out.checkins(&checkins.items)
        }
    }
}

/// Login needs only the client ID and secret; the rest call the API
async fn auth(
    config: &Config,
    config_path: &Path,
    cmd: AuthCommand,
    out: &mut Printer<impl Write>,
) -> Result<()> {
    match cmd {
        AuthCommand::Login {
            port,
            save,
            no_browser,
        } => login(config, config_path, port, save, no_browser, out).await,
        AuthCommand::Checkins { range } => {
            let client = build_client(config)?;
            let checkins = call(client.auth().checkins_min_max_id_limit(
                range.min_id,
                range.max_id,
                range.limit,
            ))
            .await?;
            out.checkins(&checkins.items)
        }
        AuthCommand::Checkin(args) => {
            let client = build_client(config)?;
            let checkin = call(client.auth().checkin(&checkin_request(args))).await?;
            out.checkins(&[checkin])
        }
        AuthCommand::Toast { checkin_id } => {
            let client = build_client(config)?;
            call(client.auth().toast(checkin_id)).await?;
            out.message("toasted", &checkin_id.to_string())
        }
    }
}

fn checkin_request(args: CheckinArgs) -> CheckinRequest {
    let gmt_offset = args.gmt_offset.unwrap_or_else(local_gmt_offset);

    CheckinRequest {
        foursquare_id: args.foursquare_id.unwrap_or_default(),
        latitude: args.latitude.unwrap_or_default(),
        longitude: args.longitude.unwrap_or_default(),
        comment: args.comment.unwrap_or_default(),
        rating: args.rating.unwrap_or_default(),
        facebook: args.facebook,
        twitter: args.twitter,
        foursquare: args.foursquare,
        ..CheckinRequest::new(args.beer_id, gmt_offset, args.timezone)
    }
}

/// Whole hours between local time and UTC
fn local_gmt_offset() -> i32 {
    chrono::Local::now().offset().local_minus_utc() / 3600
}

/// Runs the OAuth flow against a temporary local server
async fn login(
    config: &Config,
    config_path: &Path,
    port: u16,
    save: bool,
    no_browser: bool,
    out: &mut Printer<impl Write>,
) -> Result<()> {
    let redirect_url = format!("http://localhost:{port}{CALLBACK_PATH}");
    let handler = OAuthHandler::new(&config.client_id, &config.client_secret, &redirect_url)?;
    let authenticate_url = handler.authenticate_url();

    let (token_tx, mut token_rx) = mpsc::channel::<String>(1);
    let app = Router::new().nest(
        CALLBACK_PATH,
        handler.router_with(Arc::new(move |token: String| {
            let _ = token_tx.try_send(token);
            "Logged in to Untappd. You can close this window.".into_response()
        })),
    );

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to listen on port {port}"))?;
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    tracing::info!("Authorize untappdctl at {}", authenticate_url);
    if !no_browser {
        if let Err(e) = open::that(&authenticate_url) {
            tracing::error!("Failed to open browser: {}", e);
        }
    }

    let token = tokio::select! {
        token = token_rx.recv() => token.context("Login server stopped before a token arrived")?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Login cancelled"),
    };
    server.abort();

    if save {
        save_token(config_path, &token)?;
        tracing::info!(path = %config_path.display(), "Saved access token");
    }

    out.message("token", &token)
}

/// Stores `token` in the config file, keeping its other values
fn save_token(path: &Path, token: &str) -> Result<()> {
    let mut config = Config::load_from(path)?;
    config.access_token = token.to_string();
    config.save_to(path)
}
