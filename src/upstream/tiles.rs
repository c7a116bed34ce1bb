//! Tile server selection and URL construction.
//!
//! Host choice is a deterministic function of the coordinate, not a
//! stateful rotation: the same tile always maps to the same server,
//! which keeps browser-side and intermediary caches effective.

/// XYZ tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
}

/// Select the upstream host for a coordinate: `(x + y) mod N` over the
/// fixed ordered server list. Returns `None` only for an empty list.
pub fn select_host(servers: &[String], coord: TileCoord) -> Option<&str> {
    if servers.is_empty() {
        return None;
    }
    let index = ((coord.x as u64 + coord.y as u64) % servers.len() as u64) as usize;
    Some(servers[index].as_str())
}

/// Format the upstream tile URL `{host}/{z}/{x}/{y}.png`.
pub fn tile_url(host: &str, coord: TileCoord) -> String {
    format!(
        "{}/{}/{}/{}.png",
        host.trim_end_matches('/'),
        coord.zoom,
        coord.x,
        coord.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servers() -> Vec<String> {
        vec!["https://a.example".into(), "https://b.example".into(), "https://c.example".into()]
    }

    #[test]
    fn selection_is_deterministic() {
        let servers = servers();
        let coord = TileCoord { zoom: 12, x: 2048, y: 1361 };

        let first = select_host(&servers, coord).unwrap();
        for _ in 0..10 {
            assert_eq!(select_host(&servers, coord).unwrap(), first);
        }
    }

    #[test]
    fn selection_follows_x_plus_y_mod_n() {
        let servers = servers();

        let cases = [
            (TileCoord { zoom: 1, x: 0, y: 0 }, "https://a.example"),
            (TileCoord { zoom: 1, x: 1, y: 0 }, "https://b.example"),
            (TileCoord { zoom: 1, x: 1, y: 1 }, "https://c.example"),
            (TileCoord { zoom: 1, x: 2, y: 1 }, "https://a.example"),
        ];
        for (coord, expected) in cases {
            assert_eq!(select_host(&servers, coord).unwrap(), expected);
        }
    }

    #[test]
    fn large_coordinates_do_not_overflow() {
        let servers = servers();
        let coord = TileCoord { zoom: 22, x: u32::MAX, y: u32::MAX };
        assert!(select_host(&servers, coord).is_some());
    }

    #[test]
    fn empty_server_list_yields_none() {
        let coord = TileCoord { zoom: 1, x: 1, y: 1 };
        assert!(select_host(&[], coord).is_none());
    }

    #[test]
    fn formats_tile_url() {
        let coord = TileCoord { zoom: 14, x: 8190, y: 5447 };
        assert_eq!(
            tile_url("https://a.example/", coord),
            "https://a.example/14/8190/5447.png"
        );
    }
}
