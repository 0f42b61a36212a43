#![forbid(unsafe_code)]

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use dust_core::config::MIN_DATASET_SIZE;
    use dust_core::{EngineError, HotReloadConfig};
    use dust_dataset::{decode_entities, DatasetImage, Entity, Rgba8, ShapeType};
    use dust_reload::{ReloadMode, ShaderWatch};

    // ---- Golden fixtures ----
    const CONFIG_FULL_JSON: &str = include_str!("../fixtures/config_full.json");
    const CONFIG_UNKNOWN_KEY_JSON: &str = include_str!("../fixtures/config_unknown_key.json");
    const CONFIG_BAD_DATASET_JSON: &str = include_str!("../fixtures/config_bad_dataset.json");
    const CONFIG_SMALL_DATASET_JSON: &str = include_str!("../fixtures/config_small_dataset.json");
    const DATASET_TWO_ENTITIES_JSON: &str = include_str!("../fixtures/dataset_two_entities.json");

    fn write_temp_fixture(name: &str, ext: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("dust_contract_tests_{name}_{ts}.{ext}"));
        fs::write(&p, contents).expect("write fixture");
        p
    }

    #[test]
    fn golden_full_config_matches_defaults() {
        let path = write_temp_fixture("config_full", "json", CONFIG_FULL_JSON);
        let cfg = HotReloadConfig::load(&path).expect("config_full.json should parse");
        assert_eq!(cfg, HotReloadConfig::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_unknown_key_is_rejected() {
        let path = write_temp_fixture("config_unknown_key", "json", CONFIG_UNKNOWN_KEY_JSON);
        let err = HotReloadConfig::load(&path).expect_err("unknown keys must fail");

        // Keep this stable but not overly strict.
        let msg = err.to_string().to_lowercase();
        assert!(matches!(err, EngineError::Json { .. }), "{msg}");
        assert!(msg.contains("unknown") || msg.contains("shader"), "{msg}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_oversized_dataset_is_rejected() {
        let path = write_temp_fixture("config_bad_dataset", "json", CONFIG_BAD_DATASET_JSON);
        let err = HotReloadConfig::load(&path).expect_err("dataset_size 1024 must fail");
        assert!(
            err.to_string().contains("dataset_size"),
            "expected error to name the key, got: {err}"
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_dataset_too_small_for_a_frame_is_rejected() {
        let path = write_temp_fixture("config_small_dataset", "json", CONFIG_SMALL_DATASET_JSON);
        let err = HotReloadConfig::load(&path).expect_err("dataset_size 3 must fail");
        assert!(matches!(err, EngineError::InvalidConfig { .. }), "{err}");
        let _ = fs::remove_file(path);

        // Every accepted size holds a circle and a box.
        let mut image = DatasetImage::new(MIN_DATASET_SIZE as usize);
        let used = image
            .write_entities(&[
                Entity::circle((320.0, 10.0), 20.0),
                Entity::rect((100.0, 100.0), (20.0, 20.0), 45),
            ])
            .expect("two records fit the smallest dataset");
        assert_eq!(used, 10);
    }

    fn entity_from_json(v: &serde_json::Value) -> Entity {
        let pair = |key: &str| {
            let a = v[key].as_array().expect("pair");
            (
                a[0].as_f64().expect("number") as f32,
                a[1].as_f64().expect("number") as f32,
            )
        };
        Entity {
            shape: ShapeType::from_u8(v["shape"].as_u64().expect("shape") as u8).expect("known"),
            position: pair("position"),
            size: pair("size"),
            rotation: v["rotation"].as_i64().expect("rotation") as i32,
        }
    }

    #[test]
    fn golden_dataset_layout() {
        let fixture: serde_json::Value =
            serde_json::from_str(DATASET_TWO_ENTITIES_JSON).expect("fixture parses");
        let size = fixture["size"].as_u64().unwrap() as usize;
        let entities: Vec<Entity> = fixture["entities"]
            .as_array()
            .unwrap()
            .iter()
            .map(entity_from_json)
            .collect();

        let mut image = DatasetImage::new(size);
        let used = image.write_entities(&entities).unwrap();
        assert_eq!(used, 10);

        for (x, px) in fixture["row0"].as_array().unwrap().iter().enumerate() {
            let b: Vec<u8> = px
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c.as_u64().unwrap() as u8)
                .collect();
            assert_eq!(
                image.pixel(x, 0),
                Some(Rgba8::new(b[0], b[1], b[2], b[3])),
                "pixel ({x}, 0)"
            );
        }

        // Everything past the records stays transparent.
        for y in 1..size {
            for x in 0..size {
                assert_eq!(image.pixel(x, y), Some(Rgba8::TRANSPARENT));
            }
        }

        assert_eq!(decode_entities(&image), entities);
    }

    #[test]
    fn reload_cycle_against_real_file() {
        let path = write_temp_fixture("reload_cycle", "fs", "#version 330 core\nvoid main(){}\n");
        let mut watch = ShaderWatch::new(&path);
        assert_eq!(watch.mode(), ReloadMode::Manual);

        // Nothing changed: a click finds nothing to reload.
        assert!(watch.should_check(true));
        assert!(watch.poll().is_none());

        // Whole seconds, so coarse filesystem timestamps compare equal.
        let now_secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let later = UNIX_EPOCH + std::time::Duration::from_secs(now_secs + 10);
        fs::write(&path, "#version 330 core\nout vec4 c;\nvoid main(){ c = vec4(1.0); }\n")
            .unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        // In MANUAL mode the change waits for a trigger.
        assert!(!watch.should_check(false));
        assert_eq!(watch.toggle_mode(), ReloadMode::Auto);
        assert!(watch.should_check(false));

        let change = watch.poll().expect("edit detected");
        assert_eq!(change.current, Some(later));
        assert!(watch.read_source().unwrap().contains("vec4(1.0)"));

        let _ = fs::remove_file(path);
    }
}
