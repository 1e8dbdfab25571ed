use selene::zodiac::{normalize, sign_from_longitude, Sign};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn test_normalize_stays_in_range() {
    let samples = [
        0.0, -0.0, 1e-12, -1e-12, 30.0, 359.999, 360.0, -360.0, 720.0, -720.0,
        361.5, -1.5, -359.999, 1e6, -1e6, 123456.789, -98765.4321,
    ];
    for x in samples {
        let n = normalize(x);
        assert!((0.0..360.0).contains(&n), "normalize({x}) = {n}");
    }

    let mut x = -1440.0;
    while x <= 1440.0 {
        let n = normalize(x);
        assert!((0.0..360.0).contains(&n), "normalize({x}) = {n}");
        x += 7.25;
    }
}

#[test]
fn test_normalize_values() {
    assert_close(normalize(-30.0), 330.0);
    assert_close(normalize(390.0), 30.0);
    assert_close(normalize(720.0), 0.0);
    assert_close(normalize(-720.0), 0.0);
    assert_eq!(normalize(f64::NAN), 0.0);
}

#[test]
fn test_sign_from_longitude_fixed_points() {
    let aries_start = sign_from_longitude(0.0);
    assert_eq!(aries_start.sign, Sign::Aries);
    assert_close(aries_start.degree, 0.0);

    let aries_end = sign_from_longitude(29.999);
    assert_eq!(aries_end.sign, Sign::Aries);
    assert!((aries_end.degree - 29.999).abs() < 1e-9);

    let taurus = sign_from_longitude(30.0);
    assert_eq!(taurus.sign, Sign::Taurus);
    assert_close(taurus.degree, 0.0);

    let pisces = sign_from_longitude(359.999);
    assert_eq!(pisces.sign, Sign::Pisces);
    assert!((pisces.degree - 29.999).abs() < 1e-9);
}

#[test]
fn test_sign_from_longitude_negative_and_large() {
    let pos = sign_from_longitude(-45.0);
    assert_eq!(pos.sign, Sign::Aquarius);
    assert_close(pos.degree, 15.0);
    assert_close(pos.longitude, 315.0);

    let pos = sign_from_longitude(725.0);
    assert_eq!(pos.sign, Sign::Aries);
    assert_close(pos.degree, 5.0);
}

#[test]
fn test_sign_matches_floor_of_longitude() {
    let mut lon = 0.0;
    while lon < 360.0 {
        let pos = sign_from_longitude(lon);
        assert_eq!(pos.sign.index(), (lon / 30.0).floor() as usize);
        assert!((0.0..30.0).contains(&pos.degree));
        lon += 0.37;
    }
}
