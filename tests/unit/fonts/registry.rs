use super::*;

#[test]
fn empty_bytes_are_rejected() {
    let err = FontFace::from_bytes(Vec::new()).unwrap_err();
    assert!(matches!(err, CountdownError::Font(_)));
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = FontFace::from_bytes(b"definitely not a font file".to_vec()).unwrap_err();
    assert!(matches!(err, CountdownError::Font(_)));
}

#[test]
fn missing_file_names_the_path() {
    let err = FontRegistry::load(
        Path::new("/nonexistent/regular.ttf"),
        Path::new("/nonexistent/bold.ttf"),
    )
    .unwrap_err();
    assert!(matches!(err, CountdownError::Font(_)));
    assert!(err.to_string().contains("/nonexistent/regular.ttf"));
}

#[test]
fn system_fonts_expose_family_names() {
    let Some(fonts) = load_system_fonts() else {
        eprintln!("no system fonts found; skipping");
        return;
    };
    for weight in [FontWeight::Regular, FontWeight::Bold] {
        let face = fonts.face(weight);
        assert!(!face.family().trim().is_empty());
        assert!(face.byte_len > 0);
    }
}
