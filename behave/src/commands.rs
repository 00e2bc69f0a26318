//! # Command Execution
//!
//! Maps each parsed [`Commands`] onto one call of the `behave_core` client and writes the
//! formatted result to the given output. Leaderboard results are written page by page as
//! they arrive.
use crate::cli::{BadgeCommands, Commands, LeaderboardCommands, PlayerCommands};
use crate::formatter::FormattedString;
use behave_core::{BehaveClient, Payload, RequestError, ResultsError, ResultsOptions, Transport};
use std::io::Write;


/// Everything that can abort a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Results(#[from] ResultsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CommandError> for FormattedString {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Request(err) => err.into(),
            CommandError::Results(err) => err.into(),
            CommandError::Io(err) => err.into(),
        }
    }
}

pub async fn execute<T: Transport>(
    client: &BehaveClient<T>,
    command: Commands,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let payload = match command {
        Commands::Track {
            player_id,
            verb,
            context,
        } => client.track(&player_id, &verb, context).await?,
        Commands::Identify { player_id, traits } => client.identify(&player_id, traits).await?,
        Commands::Player { sub } => player(client, sub).await?,
        Commands::Leaderboard { sub } => match sub {
            LeaderboardCommands::Create {
                name,
                reference_id,
                attrs,
            } => {
                client
                    .leaderboards()
                    .create(&name, &reference_id, attrs)
                    .await?
            }
            LeaderboardCommands::Delete { leaderboard_id } => {
                client.leaderboards().delete(&leaderboard_id).await?
            }
            LeaderboardCommands::Results {
                leaderboard_id,
                limit,
                max,
                page,
                filters,
            } => {
                let options = ResultsOptions::default()
                    .limit(limit)
                    .max(max)
                    .page(page)
                    .filters(filters);
                return stream_results(client, &leaderboard_id, options, out).await;
            }
        },
        Commands::Badge {
            sub: BadgeCommands::Delete { badge_id },
        } => client.badges().delete(&badge_id).await?,
    };

    write!(out, "{}", FormattedString::from(payload.into_value()))?;
    Ok(())
}

async fn player<T: Transport>(
    client: &BehaveClient<T>,
    command: PlayerCommands,
) -> Result<Payload, RequestError> {
    let players = client.players();

    match command {
        PlayerCommands::Rank {
            player_id,
            leaderboard_id,
        } => Ok(players
            .rank(&player_id, &leaderboard_id)
            .await?
            .map_or(Payload::Empty, Payload::Single)),
        PlayerCommands::Ranks { player_id, options } => players.ranks(&player_id, options).await,
        PlayerCommands::Badges { player_id, locked } => match locked {
            true => players.locked_badges(&player_id).await,
            false => players.badges(&player_id).await,
        },
        PlayerCommands::AddIdentity {
            player_id,
            identity,
            provider,
        } => players.add_identity(&player_id, &identity, &provider).await,
        PlayerCommands::RemoveIdentity {
            player_id,
            provider,
        } => players.remove_identity(&player_id, &provider).await,
    }
}

async fn stream_results<T: Transport>(
    client: &BehaveClient<T>,
    leaderboard_id: &str,
    options: ResultsOptions,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut pager = client.leaderboards().results(leaderboard_id, options)?;

    while let Some(page) = pager.next_page().await? {
        write!(out, "{}", FormattedString::from(page))?;
        out.flush()?;
    }

    Ok(())
}
