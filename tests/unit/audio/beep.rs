use super::*;

#[test]
fn fifteen_second_schedule() {
    let beeps = beep_schedule(15);
    let seconds: Vec<u32> = beeps.iter().map(|b| b.second).collect();
    assert_eq!(seconds, (5..=14).collect::<Vec<_>>());
    for b in &beeps[..9] {
        assert_eq!(b.freq_hz, 1000.0);
    }
    assert_eq!(beeps[9].freq_hz, 1500.0);
}

#[test]
fn short_countdowns_beep_every_second() {
    let beeps = beep_schedule(3);
    assert_eq!(
        beeps,
        vec![
            Beep { second: 0, freq_hz: 1000.0 },
            Beep { second: 1, freq_hz: 1000.0 },
            Beep { second: 2, freq_hz: 1500.0 },
        ]
    );
    assert_eq!(beep_schedule(1), vec![Beep { second: 0, freq_hz: 1500.0 }]);
    assert!(beep_schedule(0).is_empty());
}

#[test]
fn waveform_values() {
    let w = beep_waveform(1000.0, SAMPLE_RATE, 4410);
    assert_eq!(w.len(), 4410);
    assert_eq!(w[0], 0);
    // sin(2π * 1000 / 44100) = 0.14212...
    assert_eq!(w[1], (32767.0 * (TAU * 1000.0 / 44100.0).sin()).round() as i16);
    assert!(w.iter().all(|&s| s > -32768));
    // A quarter period at 1000 Hz and 4 kHz sampling lands exactly on the peak.
    assert_eq!(beep_waveform(1000.0, 4000, 2)[1], 32767);
}

#[test]
fn default_plan_beep_is_a_tenth_of_a_second() {
    assert_eq!(BeepPlan::default().beep_len(), 4410);
}

#[test]
fn track_places_beeps_on_whole_seconds() {
    let plan = BeepPlan::default();
    let track = synthesize_beep_track(15, &plan);
    assert_eq!(track.sample_rate, 44_100);
    assert_eq!(track.channels, 1);
    assert_eq!(track.samples.len(), 15 * 44_100);

    let rate = 44_100usize;
    // Silence before second 5.
    assert!(track.samples[..5 * rate].iter().all(|&s| s == 0));
    // Silence between beeps.
    assert!(track.samples[5 * rate + 4410..6 * rate].iter().all(|&s| s == 0));

    let std = beep_waveform(1000.0, 44_100, 4410);
    let fin = beep_waveform(1500.0, 44_100, 4410);
    assert_eq!(&track.samples[5 * rate..5 * rate + 4410], std.as_slice());
    assert_eq!(&track.samples[14 * rate..14 * rate + 4410], fin.as_slice());
}

#[test]
fn beeps_past_the_buffer_are_truncated() {
    let plan = BeepPlan {
        sample_rate: 100,
        beep_secs: 2.5,
        freq_hz: 7.0,
        final_freq_hz: 13.0,
        ..BeepPlan::default()
    };
    let track = synthesize_beep_track(2, &plan);
    assert_eq!(track.samples.len(), 200);
    // The second-0 beep overlaps the second-1 beep; saturating addition keeps values in range.
    let a = beep_waveform(7.0, 100, 250);
    let b = beep_waveform(13.0, 100, 250);
    assert_eq!(&track.samples[..100], &a[..100]);
    assert_eq!(track.samples[150], a[150].saturating_add(b[50]));
}
