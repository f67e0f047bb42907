use super::*;

#[test]
fn s16le_bytes_are_little_endian() {
    let t = AudioTrack::mono(8000, vec![1, -2, 0x1234]);
    assert_eq!(t.to_s16le_bytes(), vec![1, 0, 0xFE, 0xFF, 0x34, 0x12]);
    assert_eq!(t.frames(), 3);
}

#[test]
fn duration_follows_sample_count() {
    let t = AudioTrack::mono(44_100, vec![0; 44_100 * 3]);
    assert!((t.duration_secs() - 3.0).abs() < 1e-12);
    assert_eq!(AudioTrack::mono(0, vec![0; 4]).duration_secs(), 0.0);
}

#[test]
fn write_creates_parent_and_guard_cleans_up() {
    let dir = temp_path("countdown_pcm_test", "d");
    let path = dir.join("nested").join("beeps.s16le");
    let t = AudioTrack::mono(10, vec![7, 8]);
    t.write_s16le(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![7, 0, 8, 0]);

    {
        let _guard = TempFileGuard(Some(path.clone()));
    }
    assert!(!path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
