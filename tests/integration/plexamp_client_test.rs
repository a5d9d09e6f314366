//! Integration tests for the Plexamp HTTP client
//!
//! These tests run the real reqwest client against a stub server on localhost.

use crate::test_utils::{closed_port_url, timeline_xml, RecordingBacklight, StubPlexamp};
use r_plexpanel::backlight::{Backlight, BacklightState, BacklightWaker};
use r_plexpanel::plexamp::{
    Command, CommandOutcome, PlaybackState, PlayerApi, PlexampClient, Remote, TimelineSnapshot,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(test)]
mod plexamp_client_tests {
    use super::*;

    fn remote(base_url: &str, step: u8) -> (Remote, Arc<RecordingBacklight>) {
        let backlight = Arc::new(RecordingBacklight::new(BacklightState::Off));
        let client = PlexampClient::new(base_url, Duration::from_millis(500));
        let remote = Remote::new(
            Arc::new(client),
            "abc123",
            step,
            BacklightWaker::new(backlight.clone()),
        );
        (remote, backlight)
    }

    #[tokio::test]
    async fn test_poll_reads_music_timeline() {
        let stub = StubPlexamp::start(timeline_xml("playing", 72)).await;
        let client = PlexampClient::new(&stub.base_url, Duration::from_secs(2));

        let snapshot = client.poll_timeline().await.unwrap();
        assert_eq!(
            snapshot,
            Some(TimelineSnapshot {
                state: PlaybackState::Playing,
                volume: Some(72),
            })
        );
        assert_eq!(
            stub.requests(),
            vec!["/player/timeline/poll?wait=0&includeMetadata=0&commandID=1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_volume_up_is_clamped_on_the_wire() {
        let stub = StubPlexamp::start(timeline_xml("playing", 95)).await;
        let (remote, backlight) = remote(&stub.base_url, 10);

        remote.execute(Command::VolumeUp).await;

        assert_eq!(
            stub.commands(),
            vec!["/player/playback/setParameters?volume=100".to_string()]
        );
        assert_eq!(backlight.state(), BacklightState::On);
    }

    #[tokio::test]
    async fn test_volume_down_is_clamped_on_the_wire() {
        let stub = StubPlexamp::start(timeline_xml("paused", 5)).await;
        let (remote, _) = remote(&stub.base_url, 10);

        remote.execute(Command::VolumeDown).await;

        assert_eq!(
            stub.commands(),
            vec!["/player/playback/setParameters?volume=0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_play_media_request_line() {
        let stub = StubPlexamp::start(timeline_xml("stopped", 50)).await;
        let (remote, _) = remote(&stub.base_url, 5);

        remote.execute(Command::PlayMedia).await;

        assert_eq!(
            stub.commands(),
            vec![
                "/player/playback/playMedia?uri=server://abc123/com.plexapp.plugins.library/library/sections/15/stations/1"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_player() {
        let (remote, backlight) = remote(&closed_port_url().await, 5);

        assert_eq!(remote.poll().await, TimelineSnapshot::unavailable());
        assert_eq!(remote.execute(Command::VolumeUp).await, CommandOutcome::Skipped);
        assert_eq!(remote.execute(Command::PlayPause).await, CommandOutcome::Failed);
        assert!(backlight.transitions().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_drops_command() {
        let stub = StubPlexamp::start(timeline_xml("playing", 50)).await;
        stub.fail_commands(true);
        let (remote, backlight) = remote(&stub.base_url, 5);

        assert_eq!(remote.execute(Command::Next).await, CommandOutcome::Failed);
        assert_eq!(stub.commands(), vec!["/player/playback/skipNext".to_string()]);
        assert_eq!(backlight.state(), BacklightState::Off);
    }

    #[tokio::test]
    async fn test_garbage_body_reads_as_stopped() {
        let stub = StubPlexamp::start("<MediaContainer><Timeline".to_string()).await;
        let (remote, _) = remote(&stub.base_url, 5);
        assert_eq!(remote.state().await, PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn test_hung_player_is_bounded_by_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let (remote, _) = remote(&format!("http://{}", addr), 5);
        let started = Instant::now();
        assert_eq!(remote.state().await, PlaybackState::Stopped);
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
