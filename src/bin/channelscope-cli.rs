use channelscope::format::format_count;
use channelscope::{
    compare_group, sort_videos, track_channels, untrack_channel, ChannelGroup, DateRange, KeyPool,
    StateStore, VideoLookup, VideoSortOrder, VideoStat, YouTubeClient,
};
use eyre::Context;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
channelscope-cli - YouTube channel statistics from the terminal

usage: channelscope-cli <command> [args]

commands:
  keys <KEY[,KEY...]>          replace the stored API key pool
  track <IDENTIFIER>...        track channels (id, @handle, or channel URL)
  untrack <CHANNEL_ID>         stop tracking a channel
  list                         show tracked channels
  stats <IDENTIFIER>           one channel's current statistics
  videos <IDENTIFIER> [SORT] [PAGE_TOKEN]
                               one page of videos; SORT is date, viewCount,
                               or likeCount
  range <IDENTIFIER> <FROM> <TO>
                               total views/videos published in FROM..TO
                               (YYYY-MM-DD, inclusive; quota-expensive)
  newest <IDENTIFIER> [FROM TO]
  oldest <IDENTIFIER>
  group <NAME> <CHANNEL_ID>... create or replace a comparison group
  compare <NAME> [FROM TO]     compare a group's channels side by side
  videos-per-page <N>          set the videos page size preference

State lives under $CHANNELSCOPE_STATE (default ./channelscope-state).
Keys can also be supplied via $YOUTUBE_API_KEYS, comma separated.";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let rest = &args[1..];

    let state_dir = std::env::var("CHANNELSCOPE_STATE")
        .unwrap_or_else(|_| "channelscope-state".to_string());
    let store = StateStore::new(&state_dir);

    match (command, rest) {
        ("keys", [keys]) => {
            let keys: Vec<String> = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
            store.save_api_keys(&keys).await?;
            println!("stored {} API key(s)", keys.len());
        }
        ("track", identifiers) if !identifiers.is_empty() => {
            let client = client_from(&store).await?;
            let input = identifiers.join("\n");
            let added = track_channels(&client, &store, &input).await?;
            for channel in &added {
                println!("tracking {} ({})", channel.title, channel.channel_id);
            }
            if added.is_empty() {
                println!("nothing new to track");
            }
        }
        ("untrack", [channel_id]) => {
            if untrack_channel(&store, channel_id).await? {
                println!("untracked {channel_id}");
            } else {
                println!("{channel_id} was not tracked");
            }
        }
        ("list", []) => {
            let channels = store.load_channels().await;
            if channels.is_empty() {
                println!("no channels tracked; use `track` first");
            }
            for channel in &channels {
                println!(
                    "{}  {} subscribers, {} views, {} videos  ({})",
                    channel.title,
                    format_count(&channel.subscriber_count),
                    format_count(&channel.view_count),
                    channel.video_count,
                    channel.channel_id,
                );
            }
        }
        ("stats", [identifier]) => {
            let client = client_from(&store).await?;
            let stats = client.channel_stats(identifier).await?;
            println!("{} ({})", stats.title, stats.channel_id);
            if let Some(handle) = &stats.custom_url {
                println!("  handle:      {handle}");
            }
            println!("  created:     {}", stats.published_at);
            println!("  subscribers: {}", format_count(&stats.subscriber_count));
            println!("  views:       {}", format_count(&stats.view_count));
            println!("  videos:      {}", stats.video_count);
            println!("  uploads:     {}", stats.uploads_playlist);
        }
        ("videos", [identifier, sort_and_token @ ..]) if sort_and_token.len() <= 2 => {
            let order = match sort_and_token.first() {
                Some(raw) => raw.parse::<VideoSortOrder>()?,
                None => VideoSortOrder::default(),
            };
            let page_token = sort_and_token.get(1).map(String::as_str);

            let client = client_from(&store).await?;
            let channel_id = client.resolve_channel_id(identifier).await?;
            let page_size = store.load_videos_per_page().await;
            let mut page = client
                .channel_videos(&channel_id, page_size, page_token)
                .await?;
            sort_videos(&mut page.videos, order);

            for video in &page.videos {
                print_video(video);
            }
            if let Some(token) = &page.next_page_token {
                println!("next page: {token}");
            }
        }
        ("range", [identifier, from, to]) => {
            let range = DateRange::parse(from, to)?;
            let client = client_from(&store).await?;
            let channel_id = client.resolve_channel_id(identifier).await?;
            let totals = client.channel_stats_for_range(&channel_id, &range).await?;
            println!(
                "{} to {}: {} views across {} videos",
                range.start(),
                range.end(),
                format_count(&totals.view_count.to_string()),
                totals.video_count,
            );
        }
        ("newest", [identifier, bounds @ ..]) if bounds.is_empty() || bounds.len() == 2 => {
            let range = range_from(bounds)?;
            let client = client_from(&store).await?;
            let channel_id = client.resolve_channel_id(identifier).await?;
            match client
                .newest_video_in_range(&channel_id, range.as_ref())
                .await?
            {
                Some(video) => print_video(&video),
                None => println!("no matching video"),
            }
        }
        ("oldest", [identifier]) => {
            let client = client_from(&store).await?;
            let stats = client.channel_stats(identifier).await?;
            match client.oldest_video(&stats.uploads_playlist).await {
                Some(video) => print_video(&video),
                None => println!("no matching video"),
            }
        }
        ("group", [name, channel_ids @ ..]) if !channel_ids.is_empty() => {
            let mut group = ChannelGroup::new(name.clone());
            for channel_id in channel_ids {
                group.add_channel(channel_id.clone());
            }
            let mut groups = store.load_groups().await;
            groups.retain(|g| g.name != group.name);
            groups.push(group);
            store.save_groups(&groups).await?;
            println!("saved group {name} with {} channel(s)", channel_ids.len());
        }
        ("compare", [name, bounds @ ..]) if bounds.is_empty() || bounds.len() == 2 => {
            let range = range_from(bounds)?;
            let groups = store.load_groups().await;
            let group = groups
                .iter()
                .find(|g| g.name == *name)
                .ok_or_else(|| eyre::eyre!("no group named {name:?}"))?;
            let tracked = store.load_channels().await;

            let client = client_from(&store).await?;
            let entries = compare_group(&client, group, &tracked, range.as_ref()).await?;
            if entries.is_empty() {
                println!("group {name:?} has no tracked channels");
            }
            for entry in &entries {
                println!(
                    "{}: {} views, {} videos",
                    entry.stats.title,
                    format_count(&entry.view_count()),
                    entry.video_count(),
                );
                print_lookup("newest", &entry.newest_video);
                print_lookup("oldest", &entry.oldest_video);
            }
        }
        ("videos-per-page", [n]) => {
            let n: u32 = n
                .parse()
                .wrap_err_with(|| format!("parse {n:?} as a page size"))?;
            eyre::ensure!(
                (1..=50).contains(&n),
                "page size must be between 1 and 50, got {n}"
            );
            store.save_videos_per_page(n).await?;
            println!("videos per page set to {n}");
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Builds the API client from `$YOUTUBE_API_KEYS` when set, otherwise from
/// the persisted key list.
async fn client_from(store: &StateStore) -> eyre::Result<YouTubeClient> {
    let keys: Vec<String> = match std::env::var("YOUTUBE_API_KEYS") {
        Ok(env_keys) => env_keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => store.load_api_keys().await,
    };
    eyre::ensure!(
        !keys.is_empty(),
        "no API keys available; run `channelscope-cli keys <KEY>` or set $YOUTUBE_API_KEYS"
    );
    Ok(YouTubeClient::new(KeyPool::new(keys), reqwest::Client::new()))
}

/// Parses an optional `[FROM TO]` argument pair into a date range.
fn range_from(bounds: &[String]) -> eyre::Result<Option<DateRange>> {
    match bounds {
        [] => Ok(None),
        [from, to] => DateRange::parse(from, to).map(Some),
        _ => eyre::bail!("expected either no range or both FROM and TO"),
    }
}

fn print_video(video: &VideoStat) {
    println!(
        "{}  {}  {} views, {} likes, {} comments  ({})",
        video.published_at,
        video.title,
        format_count(&video.view_count),
        format_count(&video.like_count),
        format_count(&video.comment_count),
        video.video_id,
    );
}

fn print_lookup(label: &str, lookup: &VideoLookup) {
    match lookup {
        VideoLookup::NotFetched => println!("  {label}: (not fetched)"),
        VideoLookup::Missing => println!("  {label}: none"),
        VideoLookup::Found(video) => {
            println!("  {label}: {} ({})", video.title, video.published_at);
        }
    }
}
