use crate::data::{MapConfig, MapConfigBuilder};
use anyhow::Result;
use tracing::warn;

pub fn run(builder: &MapConfigBuilder) -> Result<()> {
    let mut configs = Vec::new();
    for name in builder.map_names() {
        match builder.build(name) {
            Ok(config) => configs.push(config),
            Err(e) => warn!(map = name, error = %e, "skipping map"),
        }
    }
    write_maps(&configs, &mut std::io::stdout())
}

pub(crate) fn write_maps<W: std::io::Write>(configs: &[MapConfig], out: &mut W) -> Result<()> {
    writeln!(out, "Maps")?;
    writeln!(out, "---")?;
    for config in configs {
        writeln!(
            out,
            "{} ({}, {} object(s), refresh {} ms)",
            config.map_name,
            config.timezone.name(),
            config.objects.len(),
            config.refresh_interval
        )?;
        writeln!(
            out,
            "  center {:.4}, {:.4} zoom {}",
            config.default_coordinates.latitude,
            config.default_coordinates.longitude,
            config.default_zoom_level
        )?;
        for object in &config.objects {
            let sandbox = if object.sandbox { " [sandbox]" } else { "" };
            writeln!(out, "  - {} {} {}{}", object.name, object.method, object.url, sandbox)?;
        }
        if config.schedule.is_empty() {
            writeln!(out, "  always open")?;
        }
        for (i, range) in config.schedule.ranges().iter().enumerate() {
            writeln!(out, "  {:<4} {}", format!("#{}", i + 1), range)?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} map(s)", configs.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MapConfigDocument;
    use serde_json::json;

    fn builder() -> MapConfigBuilder {
        let doc: MapConfigDocument = serde_json::from_value(json!([
            {
                "mapName": "buses",
                "refresh_interval": 3000,
                "default_latitude": 48.8575,
                "default_longitude": 2.3514,
                "objects": [
                    {"name": "Bus 1", "url": "https://tracker.example/1"},
                    {"name": "Bus 2", "url": "https://tracker.example/2", "enable_sandbox": true}
                ],
                "time_ranges": [
                    {"days": ["french_holidays"], "startTime": "closed"},
                    {"days": ["Monday", "friday"], "startTime": "07:30", "endTime": "19:00"}
                ]
            },
            {"mapName": "bikes", "timezone": "UTC"},
            {"mapName": "broken", "timezone": "Nowhere/Land"}
        ]))
        .unwrap();
        MapConfigBuilder::new(doc)
    }

    fn render(configs: &[MapConfig]) -> String {
        let mut buf = Vec::new();
        write_maps(configs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_maps_empty() {
        let out = render(&[]);
        assert!(out.contains("Total: 0 map(s)"));
    }

    #[test]
    fn test_write_maps_lists_rules_in_order() {
        let b = builder();
        let out = render(&[b.build("buses").unwrap()]);
        assert!(out.contains("buses (Europe/Paris, 2 object(s), refresh 3000 ms)"));
        assert!(out.contains("center 48.8575, 2.3514 zoom 12"));
        assert!(out.contains("- Bus 1 GET https://tracker.example/1\n"));
        assert!(out.contains("- Bus 2 GET https://tracker.example/2 [sandbox]"));
        let first = out.find("#1   TimeRange: french_holidays, closed").unwrap();
        let second = out.find("#2   TimeRange: Monday, Friday, 07:30 - 19:00").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_write_maps_empty_schedule_is_always_open() {
        let b = builder();
        let out = render(&[b.build("bikes").unwrap()]);
        assert!(out.contains("bikes (UTC, 0 object(s), refresh 5000 ms)"));
        assert!(out.contains("always open"));
    }

    #[test]
    fn test_run_skips_unbuildable_maps() {
        assert!(run(&builder()).is_ok());
    }
}
