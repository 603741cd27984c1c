use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::controller::delays;
use crate::error::Error;
use crate::track::{PlayerState, TrackInfo};
use crate::Spotify;

/// Control the Spotify desktop app from the command line via UI automation.
#[derive(Parser, Debug)]
#[command(name = "spotctl", version, about, arg_required_else_help = true)]
pub struct Args {
    /// Log every scripted command to stderr
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Find a playlist by name and start playing it
    PlayPlaylist {
        /// Search query (use "playlist:name" to match playlists only)
        name: String,
    },
    /// Search for songs, artists or playlists, leaving results visible
    Search {
        query: String,
    },
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Prev,
    /// Show current playback status
    Status {
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Get or set the volume
    Volume {
        /// Volume level 0-100; omit to show the current volume
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        level: Option<u8>,
    },
}

#[derive(Serialize)]
struct StatusOutput {
    running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<PlayerState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track: Option<TrackInfo>,
}

pub fn run(cmd: Cmd, spotify: &Spotify) -> Result<()> {
    match cmd {
        Cmd::PlayPlaylist { name } => cmd_play_playlist(spotify, &name),
        Cmd::Search { query } => cmd_search(spotify, &query),
        Cmd::Play => {
            require_running(spotify)?;
            spotify.play()?;
            // Don't claim playback started; the status read below is the
            // only confirmation we have.
            println!("Play command sent.");
            std::thread::sleep(delays::UI);
            print_status(spotify)
        }
        Cmd::Pause => {
            require_running(spotify)?;
            spotify.pause()?;
            println!("Playback paused.");
            Ok(())
        }
        Cmd::Next => {
            require_running(spotify)?;
            spotify.next()?;
            println!("Skipped to next track.");
            std::thread::sleep(delays::UI);
            print_status(spotify)
        }
        Cmd::Prev => {
            require_running(spotify)?;
            spotify.previous()?;
            println!("Went to previous track.");
            std::thread::sleep(delays::UI);
            print_status(spotify)
        }
        Cmd::Status { json } => cmd_status(spotify, json),
        Cmd::Volume { level } => cmd_volume(spotify, level),
    }
}

fn cmd_play_playlist(spotify: &Spotify, name: &str) -> Result<()> {
    println!("Launching Spotify...");
    if spotify.is_running() {
        spotify.bring_to_front()?;
    } else {
        spotify.launch()?;
    }
    println!("Spotify is ready.");

    println!("Searching for playlist: {}", name);
    spotify.play_playlist_by_name(name)?;

    println!("Waiting for playback to start...");
    match spotify.wait_until_playing(delays::PLAYBACK_TIMEOUT) {
        Ok(()) => {
            println!("Playback started successfully!");
            println!();
            print_status(spotify)
        }
        Err(Error::Timeout(_, _)) => {
            println!("Warning: Could not verify playback started.");
            println!("The playlist may still be loading. Check Spotify manually.");
            anyhow::bail!("playback did not start within {:?}", delays::PLAYBACK_TIMEOUT)
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_search(spotify: &Spotify, query: &str) -> Result<()> {
    if spotify.is_running() {
        spotify.bring_to_front()?;
    } else {
        println!("Launching Spotify...");
        spotify.launch()?;
    }

    println!("Searching for: {}", query);
    spotify.search(query)?;
    println!("Search results should now be visible in Spotify.");
    Ok(())
}

fn cmd_status(spotify: &Spotify, json: bool) -> Result<()> {
    if !spotify.is_running() {
        if json {
            let out = StatusOutput {
                running: false,
                state: None,
                track: None,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("Spotify is not running.");
        }
        return Ok(());
    }

    if json {
        let state = spotify.get_status()?;
        let track = spotify.get_current_track()?;
        let out = StatusOutput {
            running: true,
            state: Some(state),
            track,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_status(spotify)
}

fn cmd_volume(spotify: &Spotify, level: Option<u8>) -> Result<()> {
    require_running(spotify)?;
    match level {
        None => println!("Current volume: {}", spotify.get_volume()?),
        Some(level) => {
            spotify.set_volume(level)?;
            println!("Volume set to: {}", level);
        }
    }
    Ok(())
}

fn require_running(spotify: &Spotify) -> Result<()> {
    if !spotify.is_running() {
        anyhow::bail!("Spotify is not running.");
    }
    Ok(())
}

/// Print playback state and whatever track fields the platform exposes.
fn print_status(spotify: &Spotify) -> Result<()> {
    let state = spotify.get_status()?;
    println!("Status: {}", state);

    if state == PlayerState::Stopped {
        return Ok(());
    }

    let Some(track) = spotify.get_current_track()? else {
        return Ok(());
    };

    println!("Track:  {}", track.name);
    println!("Artist: {}", track.artist);
    if let Some(album) = &track.album {
        println!("Album:  {}", album);
    }
    if let (Some(position), Some(duration)) = (track.position_ms, track.duration_ms) {
        println!("Time:   {}s / {}s", position / 1000, duration / 1000);
    }
    if let Some(url) = track.web_url() {
        println!("URL:    {}", url);
    }
    Ok(())
}
