/// A 2D drawing surface with a resizable backing store.
///
/// The method set mirrors the subset of a canvas 2D context the field needs,
/// so a browser canvas, an offscreen raster or a command recorder can all sit
/// behind it.
pub trait Surface {
    /// Backing-store width in pixels.
    fn width(&self) -> u32;
    /// Backing-store height in pixels.
    fn height(&self) -> u32;
    fn set_width(&mut self, width: u32);
    fn set_height(&mut self, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, style: &str);
    fn begin_path(&mut self);
    /// Adds a circular arc centred on `(x, y)`; angles are in radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
}
