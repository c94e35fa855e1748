//! End-to-end runs of the `equi2cube` binary.

use std::path::Path;
use std::process::Command;

use image::{Rgba, RgbaImage};

const FACES: [&str; 6] = ["pz", "nz", "px", "nx", "py", "ny"];

fn write_panorama(path: &Path) {
    let pano = RgbaImage::from_fn(64, 32, |x, _| {
        if x < 32 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    pano.save(path).unwrap();
}

fn equi2cube(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_equi2cube"));
    cmd.arg("--config").arg(config_dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_converts_panorama() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pano.png");
    let output = dir.path().join("out");
    write_panorama(&input);

    let status = equi2cube(&dir.path().join("config"))
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--interpolation", "nearest", "--layout", "cross"])
        .status()
        .unwrap();
    assert!(status.success());

    for token in FACES {
        let face = image::open(output.join(format!("pano_{token}.png")))
            .unwrap()
            .to_rgba8();
        assert_eq!(face.dimensions(), (16, 16));
        assert!(output.join("preview").join(format!("pano_{token}.png")).exists());
    }
    let cross = image::open(output.join("pano_cross.png")).unwrap();
    assert_eq!((cross.width(), cross.height()), (64, 48));
    assert!(dir.path().join("config/equi2cube.ron").exists());
}

#[test]
fn test_no_preview_skips_preview_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pano.png");
    let output = dir.path().join("out");
    write_panorama(&input);

    let status = equi2cube(&dir.path().join("config"))
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--no-preview", "--max-width", "8", "--interpolation", "linear"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!output.join("preview").exists());
    assert!(!output.join("pano_cross.png").exists());
    let face = image::open(output.join("pano_pz.png")).unwrap();
    assert_eq!(face.width(), 8);
}

#[test]
fn test_unknown_interpolation_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pano.png");
    write_panorama(&input);

    let out = equi2cube(&dir.path().join("config"))
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out"))
        .args(["--interpolation", "sinc"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown interpolation `sinc`"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_input_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = equi2cube(&dir.path().join("config"))
        .arg(dir.path().join("missing.jpg"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read"));
}
