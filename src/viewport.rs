// File: src/viewport.rs
// Pan/zoom over a single copy of the world. Bounds never wrap.

pub const WORLD_LON: (f64, f64) = (-180.0, 180.0);
pub const WORLD_LAT: (f64, f64) = (-90.0, 90.0);

/// Zoom level at which the whole world is visible.
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 9;

/// Fraction of the visible span moved per pan step.
const PAN_FRACTION: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center_lon: f64,
    center_lat: f64,
    zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        // World view centered a little north, as the web map opened
        Self::new(0.0, 20.0, MIN_ZOOM)
    }
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: u8) -> Self {
        let mut vp = Self {
            center_lon,
            center_lat,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        };
        vp.clamp_center();
        vp
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_lon, self.center_lat)
    }

    fn scale(&self) -> f64 {
        f64::from(1u32 << (self.zoom - MIN_ZOOM))
    }

    pub fn lon_span(&self) -> f64 {
        (WORLD_LON.1 - WORLD_LON.0) / self.scale()
    }

    pub fn lat_span(&self) -> f64 {
        (WORLD_LAT.1 - WORLD_LAT.0) / self.scale()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.lon_span() / 2.0;
        [self.center_lon - half, self.center_lon + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.lat_span() / 2.0;
        [self.center_lat - half, self.center_lat + half]
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        (x0..=x1).contains(&lon) && (y0..=y1).contains(&lat)
    }

    pub fn zoom_in(&mut self) {
        if self.zoom < MAX_ZOOM {
            self.zoom += 1;
        }
        self.clamp_center();
    }

    pub fn zoom_out(&mut self) {
        if self.zoom > MIN_ZOOM {
            self.zoom -= 1;
        }
        self.clamp_center();
    }

    /// Moves by whole pan steps; positive `dx` is east, positive `dy` is north.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.center_lon += f64::from(dx) * self.lon_span() * PAN_FRACTION;
        self.center_lat += f64::from(dy) * self.lat_span() * PAN_FRACTION;
        self.clamp_center();
    }

    /// Centers on a point, keeping the zoom.
    pub fn focus(&mut self, lon: f64, lat: f64) {
        self.center_lon = lon;
        self.center_lat = lat;
        self.clamp_center();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clamp_center(&mut self) {
        let half_lon = self.lon_span() / 2.0;
        let half_lat = self.lat_span() / 2.0;
        self.center_lon = self
            .center_lon
            .clamp(WORLD_LON.0 + half_lon, WORLD_LON.1 - half_lon);
        self.center_lat = self
            .center_lat
            .clamp(WORLD_LAT.0 + half_lat, WORLD_LAT.1 - half_lat);
    }
}
