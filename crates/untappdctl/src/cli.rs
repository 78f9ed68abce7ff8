use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use untappd::{Distance, Sort, DEFAULT_LIMIT, DEFAULT_RADIUS, MAX_CHECKIN_ID};

/// Query and display information from the Untappd APIv4
#[derive(Debug, Parser)]
#[command(name = "untappdctl", version)]
pub struct Cli {
    /// Client ID for Untappd APIv4
    #[arg(long, env = "UNTAPPD_ID", global = true, hide_env_values = true)]
    pub client_id: Option<String>,

    /// Client secret for Untappd APIv4
    #[arg(long, env = "UNTAPPD_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth access token; takes precedence over the client ID and secret
    #[arg(long, env = "UNTAPPD_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query for user information, by username
    #[command(subcommand, visible_alias = "u")]
    User(UserCommand),

    /// Query for beer information
    #[command(subcommand, visible_alias = "b")]
    Beer(BeerCommand),

    /// Query for brewery information
    #[command(subcommand, visible_alias = "br")]
    Brewery(BreweryCommand),

    /// Query for venue information
    #[command(subcommand, visible_alias = "v")]
    Venue(VenueCommand),

    /// Query for checkins around a location
    #[command(subcommand, visible_alias = "l")]
    Local(LocalCommand),

    /// Access authenticated Untappd APIv4 methods
    #[command(subcommand, visible_alias = "a")]
    Auth(AuthCommand),
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// User details and statistics
    #[command(visible_alias = "i")]
    Info { username: String },

    /// A user's friends
    #[command(visible_alias = "f")]
    Friends {
        username: String,
        #[command(flatten)]
        page: Page,
    },

    /// Badges a user has earned
    #[command(visible_alias = "ba")]
    Badges {
        username: String,
        #[command(flatten)]
        page: Page,
    },

    /// Beers a user has checked in
    #[command(visible_alias = "be")]
    Beers {
        username: String,
        #[command(flatten)]
        page: Page,
        #[command(flatten)]
        sort: SortArg,
    },

    /// Beers on a user's wish list
    #[command(visible_alias = "w")]
    Wishlist {
        username: String,
        #[command(flatten)]
        page: Page,
        #[command(flatten)]
        sort: SortArg,
    },

    /// A user's recent checkins
    #[command(visible_alias = "c")]
    Checkins {
        username: String,
        #[command(flatten)]
        range: IdRange,
    },
}

#[derive(Debug, Subcommand)]
pub enum BeerCommand {
    /// Beer details, by ID
    #[command(visible_alias = "i")]
    Info { id: i64 },

    /// Search beers by name
    #[command(visible_alias = "s")]
    Search {
        query: String,
        #[command(flatten)]
        page: Page,
        #[command(flatten)]
        sort: SortArg,
    },

    /// Recent checkins of a beer, by ID
    #[command(visible_alias = "c")]
    Checkins {
        id: i64,
        #[command(flatten)]
        range: IdRange,
    },
}

#[derive(Debug, Subcommand)]
pub enum BreweryCommand {
    /// Brewery details, by ID
    #[command(visible_alias = "i")]
    Info { id: i64 },

    /// Search breweries by name
    #[command(visible_alias = "s")]
    Search {
        query: String,
        #[command(flatten)]
        page: Page,
    },

    /// Recent checkins at a brewery, by ID
    #[command(visible_alias = "c")]
    Checkins {
        id: i64,
        #[command(flatten)]
        range: IdRange,
    },
}

#[derive(Debug, Subcommand)]
pub enum VenueCommand {
    /// Venue details, by ID
    #[command(visible_alias = "i")]
    Info { id: i64 },

    /// Recent checkins at a venue, by ID
    #[command(visible_alias = "c")]
    Checkins {
        id: i64,
        #[command(flatten)]
        range: IdRange,
    },
}

#[derive(Debug, Subcommand)]
pub enum LocalCommand {
    /// Recent checkins around a latitude and longitude
    #[command(visible_alias = "c")]
    Checkins {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[command(flatten)]
        range: IdRange,
        /// Search radius
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: u32,
        /// Measure the radius in kilometers instead of miles
        #[arg(long)]
        km: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Authenticate with OAuth and print the access token
    #[command(visible_alias = "l")]
    Login {
        /// Local port for the OAuth redirect
        #[arg(long, default_value_t = 8338)]
        port: u16,
        /// Store the token in the config file
        #[arg(long)]
        save: bool,
        /// Print the authorization URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Recent checkins from friends
    #[command(visible_alias = "c")]
    Checkins {
        #[command(flatten)]
        range: IdRange,
    },

    /// Check in a beer, by ID
    Checkin(CheckinArgs),

    /// Toast a checkin, by ID
    #[command(visible_alias = "t")]
    Toast { checkin_id: i64 },
}

#[derive(Debug, Args)]
pub struct CheckinArgs {
    pub beer_id: i64,

    /// Offset from GMT in hours; defaults to the local offset
    #[arg(long, allow_negative_numbers = true)]
    pub gmt_offset: Option<i32>,

    /// Time zone name, e.g. America/New_York
    #[arg(long, env = "TZ", default_value = "UTC")]
    pub timezone: String,

    /// Checkin comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Rating from 0.5 to 5
    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub foursquare_id: Option<String>,

    #[arg(long, allow_negative_numbers = true, requires = "longitude")]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Share on Facebook
    #[arg(long)]
    pub facebook: bool,

    /// Share on Twitter
    #[arg(long)]
    pub twitter: bool,

    /// Share on Foursquare
    #[arg(long)]
    pub foursquare: bool,
}

/// Offset paging flags
#[derive(Debug, Clone, Copy, Args)]
pub struct Page {
    /// Starting offset for results
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Maximum number of results; the API default when omitted
    #[arg(long)]
    pub limit: Option<u32>,
}

impl Page {
    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }
}

/// Sort flag; only values the API recognizes are accepted
#[derive(Debug, Clone, Args)]
pub struct SortArg {
    /// One of date, checkin, highest_rated, lowest_rated, highest_rated_you,
    /// lowest_rated_you, highest_abv, lowest_abv
    #[arg(long, default_value_t = Sort::DATE)]
    pub sort: Sort,
}

/// Checkin ID paging flags
#[derive(Debug, Clone, Copy, Args)]
pub struct IdRange {
    /// Minimum checkin ID
    #[arg(long, default_value_t = 0)]
    pub min_id: i64,

    /// Maximum checkin ID
    #[arg(long, default_value_t = MAX_CHECKIN_ID)]
    pub max_id: i64,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

pub fn distance(km: bool) -> Distance {
    if km {
        Distance::Kilometers
    } else {
        Distance::Miles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("untappdctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn user_beers_defaults() {
        let cli = parse(&["user", "beers", "mdlayher"]);

        match cli.command {
            Command::User(UserCommand::Beers { username, page, sort }) => {
                assert_eq!(username, "mdlayher");
                assert_eq!(page.offset, 0);
                assert_eq!(page.limit, None);
                assert_eq!(sort.sort, Sort::DATE);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn sort_is_validated() {
        let cli = parse(&["beer", "search", "stout", "--sort", "highest_abv"]);
        match cli.command {
            Command::Beer(BeerCommand::Search { sort, .. }) => assert_eq!(sort.sort, Sort::HIGHEST_ABV),
            other => panic!("unexpected command: {other:?}"),
        }

        let err = Cli::try_parse_from(["untappdctl", "beer", "search", "stout", "--sort", "tastiest"])
            .unwrap_err();
        assert!(err.to_string().contains("invalid sort"));
    }

    #[test]
    fn checkin_range_defaults() {
        let cli = parse(&["venue", "checkins", "2141"]);

        match cli.command {
            Command::Venue(VenueCommand::Checkins { id, range }) => {
                assert_eq!(id, 2141);
                assert_eq!(range.min_id, 0);
                assert_eq!(range.max_id, 2_147_483_647);
                assert_eq!(range.limit, 25);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn local_accepts_negative_coordinates() {
        let cli = parse(&["local", "checkins", "40.7", "-73.9", "--km"]);

        match cli.command {
            Command::Local(LocalCommand::Checkins {
                latitude,
                longitude,
                radius,
                km,
                ..
            }) => {
                assert!((latitude - 40.7).abs() < f64::EPSILON);
                assert!((longitude + 73.9).abs() < f64::EPSILON);
                assert_eq!(radius, 25);
                assert_eq!(distance(km), Distance::Kilometers);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["user", "info", "gregavola", "--client-id", "abc", "--json"]);
        assert_eq!(cli.client_id.as_deref(), Some("abc"));
        assert!(cli.json);
    }

    #[test]
    fn alias_resolves_subcommand() {
        let cli = parse(&["u", "i", "gregavola"]);
        assert!(matches!(cli.command, Command::User(UserCommand::Info { .. })));
    }
}
