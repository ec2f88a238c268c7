//! Built-in seed manifest of real-world satellites and tracked debris
//!
//! Constellation members are generated in bulk; their small altitude and
//! inclination jitter comes from an RNG seeded by the caller, and their risk
//! level is left unset so the risk classifier seeds it. The same seed always
//! yields the same manifest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DebrisSize, ObjectClass, ObjectSpec, OrbitType, RiskLevel};

/// (id, name, orbit, altitude km, inclination deg, velocity km/s, risk)
type Fixed = (&'static str, &'static str, OrbitType, f64, f64, f64, RiskLevel);

const STATIONS: &[Fixed] = &[
    ("iss", "ISS (ZARYA)", OrbitType::Leo, 420.0, 51.6, 7.66, RiskLevel::Safe),
    ("css", "Tiangong (CSS)", OrbitType::Leo, 390.0, 41.5, 7.68, RiskLevel::Safe),
];

const GPS: &[(&str, &str)] = &[
    ("gps-01", "GPS IIR-2"),
    ("gps-02", "GPS IIR-3"),
    ("gps-03", "GPS IIR-4"),
    ("gps-04", "GPS IIR-5"),
    ("gps-05", "GPS III-01"),
    ("gps-06", "GPS III-02"),
];

const NAMED: &[Fixed] = &[
    // Weather
    ("goes-16", "GOES-16", OrbitType::Geo, 35786.0, 0.1, 3.07, RiskLevel::Safe),
    ("goes-17", "GOES-17", OrbitType::Geo, 35786.0, 0.1, 3.07, RiskLevel::Safe),
    ("goes-18", "GOES-18", OrbitType::Geo, 35786.0, 0.1, 3.07, RiskLevel::Safe),
    ("noaa-20", "NOAA-20", OrbitType::Leo, 824.0, 98.7, 7.44, RiskLevel::Safe),
    ("noaa-21", "NOAA-21", OrbitType::Leo, 824.0, 98.7, 7.44, RiskLevel::Safe),
    ("meteosat-11", "Meteosat-11", OrbitType::Geo, 35786.0, 0.1, 3.07, RiskLevel::Safe),
    ("himawari-8", "Himawari-8", OrbitType::Geo, 35786.0, 0.1, 3.07, RiskLevel::Safe),
    // Earth observation
    ("landsat-8", "Landsat 8", OrbitType::Leo, 705.0, 98.2, 7.5, RiskLevel::Safe),
    ("landsat-9", "Landsat 9", OrbitType::Leo, 705.0, 98.2, 7.5, RiskLevel::Safe),
    ("sentinel-1a", "Sentinel-1A", OrbitType::Leo, 693.0, 98.2, 7.5, RiskLevel::Safe),
    ("sentinel-1b", "Sentinel-1B", OrbitType::Leo, 693.0, 98.2, 7.5, RiskLevel::Warning),
    ("sentinel-2a", "Sentinel-2A", OrbitType::Leo, 786.0, 98.6, 7.45, RiskLevel::Safe),
    ("sentinel-2b", "Sentinel-2B", OrbitType::Leo, 786.0, 98.6, 7.45, RiskLevel::Safe),
    ("worldview-3", "WorldView-3", OrbitType::Leo, 617.0, 97.5, 7.54, RiskLevel::Safe),
    ("planet-dove", "Planet Dove-1", OrbitType::Leo, 475.0, 97.4, 7.62, RiskLevel::Safe),
    // Scientific
    ("hubble", "Hubble Space Telescope", OrbitType::Leo, 540.0, 28.5, 7.59, RiskLevel::Warning),
    ("jwst", "James Webb ST", OrbitType::Heo, 1_500_000.0, 0.0, 0.3, RiskLevel::Safe),
    ("chandra", "Chandra X-ray", OrbitType::Heo, 139_000.0, 28.5, 1.5, RiskLevel::Safe),
    ("fermi", "Fermi Gamma-ray", OrbitType::Leo, 550.0, 25.6, 7.59, RiskLevel::Safe),
    ("tess", "TESS", OrbitType::Heo, 108_000.0, 37.0, 2.2, RiskLevel::Safe),
    // Communication
    ("intelsat-39", "Intelsat 39", OrbitType::Geo, 35786.0, 0.0, 3.07, RiskLevel::Safe),
    ("ses-17", "SES-17", OrbitType::Geo, 35786.0, 0.0, 3.07, RiskLevel::Safe),
    ("viasat-3", "ViaSat-3", OrbitType::Geo, 35786.0, 0.0, 3.07, RiskLevel::Safe),
    ("eutelsat-36d", "Eutelsat 36D", OrbitType::Geo, 35786.0, 0.0, 3.07, RiskLevel::Safe),
];

const RECON_AND_DEFUNCT: &[Fixed] = &[
    ("usa-224", "USA-224 (KH-11)", OrbitType::Leo, 260.0, 97.9, 7.77, RiskLevel::Safe),
    ("usa-290", "USA-290 (KH-11)", OrbitType::Leo, 260.0, 97.9, 7.77, RiskLevel::Safe),
    ("envisat", "Envisat (defunct)", OrbitType::Leo, 766.0, 98.5, 7.45, RiskLevel::Critical),
    ("cosmos-954", "Cosmos 954 debris", OrbitType::Leo, 450.0, 65.0, 7.64, RiskLevel::Critical),
    ("fengyun-1c", "Fengyun-1C debris", OrbitType::Leo, 850.0, 98.6, 7.43, RiskLevel::Critical),
];

/// Fragmentation events: (id prefix, name prefix, origin, count, altitude km, spread km, inclination deg)
const DEBRIS_CLOUDS: &[(&str, &str, &str, usize, f64, f64, f64)] = &[
    ("fy1c-frag", "FENGYUN 1C DEB", "Fengyun-1C ASAT test (2007)", 24, 850.0, 150.0, 98.6),
    ("c2251-frag", "COSMOS 2251 DEB", "Cosmos 2251 / Iridium 33 collision (2009)", 16, 790.0, 80.0, 74.0),
    ("ir33-frag", "IRIDIUM 33 DEB", "Cosmos 2251 / Iridium 33 collision (2009)", 10, 780.0, 60.0, 86.4),
    ("c1408-frag", "COSMOS 1408 DEB", "Cosmos 1408 ASAT test (2021)", 12, 470.0, 40.0, 82.6),
];

/// Intact spent stages and derelicts tracked as debris
const DERELICTS: &[(&str, &str, &str, OrbitType, f64, f64)] = &[
    ("sl16-rb-1", "SL-16 R/B", "Zenit-2 upper stage", OrbitType::Leo, 840.0, 71.0),
    ("sl16-rb-2", "SL-16 R/B", "Zenit-2 upper stage", OrbitType::Leo, 835.0, 71.0),
    ("cz4b-rb", "CZ-4B R/B", "Long March 4B upper stage", OrbitType::Leo, 760.0, 98.5),
    ("delta2-rb", "DELTA 2 R/B", "Delta II second stage", OrbitType::Meo, 20_100.0, 55.0),
    ("ariane5-rb", "ARIANE 5 R/B", "Ariane 5 upper stage", OrbitType::Geo, 35_650.0, 6.0),
];

/// Seed manifest of satellites and debris
pub fn world_manifest(seed: u64) -> Vec<ObjectSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::with_capacity(400);

    specs.extend(STATIONS.iter().map(fixed));

    for (id, name) in GPS {
        specs.push(satellite(id, name, OrbitType::Meo, 20200.0, 55.0, 3.87, Some(RiskLevel::Safe)));
    }

    for i in 0..100 {
        specs.push(satellite(
            &format!("starlink-{}", i + 1),
            &format!("Starlink-{}", 1000 + i),
            OrbitType::Leo,
            550.0 + rng.gen::<f64>() * 10.0,
            53.0 + rng.gen::<f64>() * 0.5,
            7.59,
            None,
        ));
    }
    constellation(&mut specs, 40, "oneweb", "OneWeb-", 100, OrbitType::Leo, 1200.0, 87.9, 7.26);
    constellation(&mut specs, 66, "iridium", "Iridium ", 100, OrbitType::Leo, 780.0, 86.4, 7.46);

    specs.extend(NAMED.iter().map(fixed));

    constellation(&mut specs, 24, "glonass", "GLONASS-M ", 700, OrbitType::Meo, 19130.0, 64.8, 3.95);
    constellation(&mut specs, 22, "galileo", "Galileo-", 200, OrbitType::Meo, 23222.0, 56.0, 3.67);
    for i in 0..30 {
        specs.push(satellite(
            &format!("beidou-{}", i + 1),
            &format!("BeiDou-3 M{}", i + 1),
            OrbitType::Meo,
            21528.0,
            55.0,
            3.77,
            Some(RiskLevel::Safe),
        ));
    }

    specs.extend(RECON_AND_DEFUNCT.iter().map(fixed));

    for &(id_prefix, name_prefix, origin, count, altitude, spread, inclination) in DEBRIS_CLOUDS {
        for i in 0..count {
            let altitude_km = altitude + (rng.gen::<f64>() - 0.5) * spread;
            let size = match rng.gen_range(0..10) {
                0 => DebrisSize::Large,
                1..=3 => DebrisSize::Medium,
                _ => DebrisSize::Small,
            };
            specs.push(ObjectSpec {
                id: format!("{}-{}", id_prefix, i + 1),
                name: format!("{} {}", name_prefix, i + 1),
                class: ObjectClass::Debris,
                orbit_type: OrbitType::Leo,
                altitude_km,
                inclination_deg: (inclination + (rng.gen::<f64>() - 0.5) * 2.0).clamp(0.0, 180.0),
                velocity_km_s: circular_speed_km_s(altitude_km),
                risk_level: None,
                origin: Some(origin.to_string()),
                size: Some(size),
            });
        }
    }

    for &(id, name, origin, orbit_type, altitude_km, inclination_deg) in DERELICTS {
        specs.push(ObjectSpec {
            id: id.to_string(),
            name: name.to_string(),
            class: ObjectClass::Debris,
            orbit_type,
            altitude_km,
            inclination_deg,
            velocity_km_s: circular_speed_km_s(altitude_km),
            risk_level: None,
            origin: Some(origin.to_string()),
            size: Some(DebrisSize::Large),
        });
    }

    specs
}

#[allow(clippy::too_many_arguments)]
fn constellation(
    specs: &mut Vec<ObjectSpec>,
    count: usize,
    id_prefix: &str,
    name_prefix: &str,
    first_number: usize,
    orbit_type: OrbitType,
    altitude_km: f64,
    inclination_deg: f64,
    velocity_km_s: f64,
) {
    for i in 0..count {
        specs.push(satellite(
            &format!("{}-{}", id_prefix, i + 1),
            &format!("{}{}", name_prefix, first_number + i),
            orbit_type,
            altitude_km,
            inclination_deg,
            velocity_km_s,
            Some(RiskLevel::Safe),
        ));
    }
}

fn satellite(
    id: &str,
    name: &str,
    orbit_type: OrbitType,
    altitude_km: f64,
    inclination_deg: f64,
    velocity_km_s: f64,
    risk_level: Option<RiskLevel>,
) -> ObjectSpec {
    ObjectSpec {
        id: id.to_string(),
        name: name.to_string(),
        class: ObjectClass::Satellite,
        orbit_type,
        altitude_km,
        inclination_deg,
        velocity_km_s,
        risk_level,
        origin: None,
        size: None,
    }
}

fn fixed(entry: &Fixed) -> ObjectSpec {
    let &(id, name, orbit_type, altitude_km, inclination_deg, velocity_km_s, risk) = entry;
    satellite(id, name, orbit_type, altitude_km, inclination_deg, velocity_km_s, Some(risk))
}

/// Circular orbit speed for a listing value; not used by propagation
fn circular_speed_km_s(altitude_km: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    const MU_EARTH_KM3_S2: f64 = 398600.4418;
    (MU_EARTH_KM3_S2 / (EARTH_RADIUS_KM + altitude_km)).sqrt()
}
