use anyhow::Result;
use std::io::Write;

/// Sound for the game: the alert cue is the terminal bell, background
/// music rides on rodio when the `music` feature is compiled in. Neither
/// failing is worth interrupting a run over.
pub struct AudioCues {
    #[cfg(feature = "music")]
    _music: Option<music::Music>,
    #[cfg(not(feature = "music"))]
    _music: (),
}

impl AudioCues {
    pub fn new(music_on: bool) -> Result<Self> {
        #[cfg(feature = "music")]
        {
            let music = if music_on {
                match music::Music::start() {
                    Ok(m) => Some(m),
                    Err(e) => {
                        tracing::warn!("music unavailable: {e}");
                        None
                    }
                }
            } else {
                None
            };
            Ok(Self { _music: music })
        }
        #[cfg(not(feature = "music"))]
        {
            let _ = music_on;
            Ok(Self { _music: () })
        }
    }

    /// Ring the terminal bell. Raw mode passes BEL through untouched.
    pub fn alert(&self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

#[cfg(feature = "music")]
mod music {
    use anyhow::{Context, Result};
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use std::time::Duration;

    /// A minimal chiptune loop synthesized in-process, so the binary does
    /// not have to carry an audio asset.
    pub struct Music {
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        _sink: Sink,
    }

    impl Music {
        pub fn start() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().context("no audio output device")?;
            let sink = Sink::try_new(&handle).context("audio sink")?;
            sink.set_volume(0.2);

            // A slow minor arpeggio, queued deep enough to outlast a run.
            for &freq in [220.0, 261.63, 329.63, 261.63].iter().cycle().take(1800) {
                let note = SineWave::new(freq)
                    .take_duration(Duration::from_millis(400))
                    .amplify(0.8);
                sink.append(note);
            }

            Ok(Self {
                _stream: stream,
                _handle: handle,
                _sink: sink,
            })
        }
    }
}
