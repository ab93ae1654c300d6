use std::sync::mpsc;
use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use snake_common::games::snake::{SoundCue, validate_volume};
use snake_common::{log, log_debug, log_warn};

use crate::config::AudioConfig;

const TONE_AMPLITUDE: f32 = 0.2;
const MUSIC_AMPLITUDE: f32 = 0.06;

/// Background melody, looped for as long as the audio thread lives.
const BACKGROUND_NOTES: &[(f32, u64)] = &[
    (392.0, 240),
    (440.0, 240),
    (523.25, 240),
    (440.0, 240),
    (349.23, 240),
    (392.0, 240),
    (329.63, 480),
];

enum AudioMessage {
    Play(SoundCue),
    SetVolume(f32),
    SetEnabled(bool),
}

/// Handle to the audio thread. The output stream is not `Send`, so it lives on its own thread and
/// cues are delivered over a channel. The thread also loops the background melody; volume and the
/// enabled flag apply to it as well as to the cues.
#[derive(Clone)]
pub struct AudioPlayer {
    tx: mpsc::Sender<AudioMessage>,
}

impl AudioPlayer {
    pub fn spawn(config: &AudioConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let volume = config.volume;
        let enabled = config.enabled;

        let spawn_result = std::thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || audio_thread(rx, volume, enabled));
        if let Err(e) = spawn_result {
            log_warn!("Failed to start audio thread: {}", e);
        }

        Self { tx }
    }

    pub fn play(&self, cue: SoundCue) {
        let _ = self.tx.send(AudioMessage::Play(cue));
    }

    pub fn set_volume(&self, volume: f32) -> Result<(), String> {
        let volume = validate_volume(volume)?;
        let _ = self.tx.send(AudioMessage::SetVolume(volume));
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.tx.send(AudioMessage::SetEnabled(enabled));
    }
}

fn audio_thread(rx: mpsc::Receiver<AudioMessage>, mut volume: f32, mut enabled: bool) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            log_warn!("No audio output available, sounds disabled: {}", e);
            return;
        }
    };
    log!("Audio output ready");

    let music = start_background_music(&handle, volume, enabled);

    while let Ok(message) = rx.recv() {
        match message {
            AudioMessage::Play(cue) if enabled => play_cue(&handle, cue, volume),
            AudioMessage::Play(_) => {}
            AudioMessage::SetVolume(v) => {
                volume = v;
                if let Some(music) = &music {
                    music.set_volume(volume);
                }
            }
            AudioMessage::SetEnabled(e) => {
                enabled = e;
                if let Some(music) = &music {
                    if enabled {
                        music.play();
                    } else {
                        music.pause();
                    }
                }
            }
        }
    }
}

/// The returned sink must stay alive; dropping it stops the music.
fn start_background_music(handle: &OutputStreamHandle, volume: f32, enabled: bool) -> Option<Sink> {
    let sink = match Sink::try_new(handle) {
        Ok(sink) => sink,
        Err(e) => {
            log_warn!("Background music unavailable: {}", e);
            return None;
        }
    };
    sink.set_volume(volume);
    if !enabled {
        sink.pause();
    }
    sink.append(background_loop().repeat_infinite());
    Some(sink)
}

fn background_loop() -> SamplesBuffer<f32> {
    let mut sample_rate = 48_000;
    let mut samples = Vec::new();
    for (frequency, millis) in BACKGROUND_NOTES {
        let note = SineWave::new(*frequency)
            .take_duration(Duration::from_millis(*millis))
            .amplify(MUSIC_AMPLITUDE);
        sample_rate = note.sample_rate();
        samples.extend(note);
    }
    SamplesBuffer::new(1, sample_rate, samples)
}

fn play_cue(handle: &OutputStreamHandle, cue: SoundCue, volume: f32) {
    let sink = match Sink::try_new(handle) {
        Ok(sink) => sink,
        Err(e) => {
            log_debug!("Dropping {:?} cue: {}", cue, e);
            return;
        }
    };
    sink.set_volume(volume);

    for (frequency, millis) in cue_notes(cue) {
        let tone = SineWave::new(*frequency)
            .take_duration(Duration::from_millis(*millis))
            .amplify(TONE_AMPLITUDE);
        sink.append(tone);
    }
    sink.detach();
}

/// Frequency in Hz and length in ms of each note.
fn cue_notes(cue: SoundCue) -> &'static [(f32, u64)] {
    match cue {
        SoundCue::Eat => &[(660.0, 50), (880.0, 70)],
        SoundCue::GameOver => &[(440.0, 150), (330.0, 150), (220.0, 300)],
    }
}
