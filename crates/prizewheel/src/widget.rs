use crate::error::WheelError;
use crate::events::PointerEvent;
use crate::spin::geometry::selected_index;
use crate::spin::gesture::{GestureEngine, Tick};
use crate::spin::rotation::RotationState;
use crate::wheel::compose::{self, ImageCache};
use crate::wheel::section::{ImageRef, MarkerPosition, SectionList, WheelSection};
use crate::wheel::style::WheelStyle;
use arcpaint::{Color, Pixmap, Point};

/// Turns an opaque image reference into a pre-sized pixel buffer. Decoding
/// and scaling live with the host; the widget only caches the results.
pub trait ImageResolver {
    fn resolve(&mut self, image: &ImageRef, width: u32, height: u32) -> Option<Pixmap>;
}

/// Resolver that knows no images. Image sections stay unresolved and fail
/// section-data validation at composite time.
#[derive(Debug, Default)]
pub struct NullResolver;

impl ImageResolver for NullResolver {
    fn resolve(&mut self, _image: &ImageRef, _width: u32, _height: u32) -> Option<Pixmap> {
        None
    }
}

/// What the host should do after handing the widget an event or a frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelUpdate {
    pub needs_redraw: bool,
    pub spinning: bool,
}

impl WheelUpdate {
    pub fn new(needs_redraw: bool, spinning: bool) -> Self {
        Self {
            needs_redraw,
            spinning,
        }
    }
}

/// The wheel itself: sections, style, the composited image, rotation, and the
/// gesture machine, glued to the host through plain method calls.
///
/// The host owns the event loop. It reports layout once, forwards pointer
/// events, pumps [`WheelWidget::advance`] once per frame while something
/// spins, and repaints with [`WheelWidget::composited`] under
/// [`WheelWidget::display_matrix`].
pub struct WheelWidget {
    sections: Option<SectionList>,
    marker: MarkerPosition,
    style: WheelStyle,
    size: Option<(u32, u32)>,
    generation_pending: bool,
    composited: Option<Pixmap>,
    rotation: RotationState,
    engine: GestureEngine,
    images: ImageCache,
    resolver: Box<dyn ImageResolver>,
    settle_listener: Option<Box<dyn FnMut(usize, f64)>>,
}

impl WheelWidget {
    pub fn new() -> Self {
        Self {
            sections: None,
            marker: MarkerPosition::default(),
            style: WheelStyle::default(),
            size: None,
            generation_pending: false,
            composited: None,
            rotation: RotationState::default(),
            engine: GestureEngine::new(),
            images: ImageCache::new(),
            resolver: Box::new(NullResolver),
            settle_listener: None,
        }
    }

    /// Replaces the wheel sections. The image cache survives; references are
    /// stable names, so previously resolved pixels stay valid.
    pub fn set_sections(&mut self, sections: Vec<WheelSection>) -> Result<(), WheelError> {
        self.sections = Some(SectionList::new(sections)?);
        Ok(())
    }

    pub fn set_marker_position(&mut self, marker: MarkerPosition) {
        self.marker = marker;
    }

    pub fn marker_position(&self) -> MarkerPosition {
        self.marker
    }

    pub fn set_style(&mut self, style: WheelStyle) {
        self.style = style;
    }

    pub fn set_border_color(&mut self, color: Option<Color>) {
        self.style.border.color = color;
    }

    pub fn set_border_thickness(&mut self, thickness: u32) {
        self.style.border.thickness = thickness;
    }

    pub fn set_separator_color(&mut self, color: Option<Color>) {
        self.style.separator.color = color;
    }

    pub fn set_separator_thickness(&mut self, thickness: u32) {
        self.style.separator.thickness = thickness;
    }

    pub fn set_settle_listener(&mut self, listener: impl FnMut(usize, f64) + 'static) {
        self.settle_listener = Some(Box::new(listener));
    }

    pub fn set_image_resolver(&mut self, resolver: impl ImageResolver + 'static) {
        self.resolver = Box::new(resolver);
    }

    /// One-shot layout notification from the host. The first call fixes the
    /// dimensions, shows a placeholder wheel until real sections are
    /// composited, and runs any generation that was requested before layout.
    pub fn layout_ready(&mut self, width: u32, height: u32) -> Result<(), WheelError> {
        if width == 0 || height == 0 {
            return Err(WheelError::InvalidDimensions { width, height });
        }
        if self.size.is_some() {
            return Ok(());
        }
        self.size = Some((width, height));
        self.rotation.init_layout(width as f64, height as f64);
        self.engine.set_dimensions(width as f64, height as f64);

        if self.composited.is_none() {
            let placeholder = SectionList::placeholder();
            self.composited = Some(compose::composite(
                &placeholder,
                &self.images,
                width,
                height,
                &self.style,
            )?);
        }
        if self.generation_pending {
            self.generation_pending = false;
            self.generate(width, height)?;
        }
        Ok(())
    }

    /// Rebuilds the wheel image now, or defers until layout reports a size.
    /// On error the previously displayed image stays in place.
    pub fn request_generation(&mut self) -> Result<(), WheelError> {
        match self.size {
            Some((width, height)) => self.generate(width, height),
            None => {
                self.generation_pending = true;
                Ok(())
            }
        }
    }

    fn generate(&mut self, width: u32, height: u32) -> Result<(), WheelError> {
        let Some(sections) = &self.sections else {
            return Err(WheelError::InvalidSectionCount { count: 0 });
        };

        // resolve image references the cache has not seen yet
        let side = width.min(height);
        for section in sections.iter() {
            if let WheelSection::Image(image) = section
                && !self.images.contains_key(image)
                && let Some(pixmap) = self.resolver.resolve(image, side, side)
            {
                self.images.insert(image.clone(), pixmap);
            }
        }

        let wheel = compose::composite(sections, &self.images, width, height, &self.style)?;
        self.composited = Some(wheel);
        log::debug!(
            "regenerated wheel image: {} sections at {}x{}",
            sections.len(),
            width,
            height
        );
        Ok(())
    }

    /// Routes a pointer sample to the gesture machine and applies any drag
    /// rotation it yields.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> WheelUpdate {
        let delta = self.engine.handle_pointer(event);
        if let Some(delta) = delta {
            self.rotation.rotate_by(delta);
        }
        WheelUpdate::new(delta.is_some(), self.engine.is_spinning())
    }

    /// Entry point for a host-side fling recognizer.
    pub fn fling(&mut self, start: Point, end: Point, velocity_x: f64, velocity_y: f64) {
        self.engine.begin_fling(start, end, velocity_x, velocity_y);
    }

    /// Turns the wheel directly, outside any gesture.
    pub fn rotate_by(&mut self, degrees: f64) {
        self.rotation.rotate_by(degrees);
    }

    /// Advances the fling animation by one frame. Settling resolves the
    /// winning section and fires the listener; an interrupted fling fires
    /// nothing.
    pub fn advance(&mut self) -> WheelUpdate {
        match self.engine.tick() {
            Tick::Idle | Tick::Abort => WheelUpdate::default(),
            Tick::Rotate(delta) => {
                self.rotation.rotate_by(delta);
                WheelUpdate::new(true, true)
            }
            Tick::Settle => {
                self.notify_settled();
                WheelUpdate::new(true, false)
            }
        }
    }

    fn notify_settled(&mut self) {
        let Some(sections) = &self.sections else {
            return;
        };
        let absolute = self.rotation.absolute_degrees();
        let index = selected_index(absolute, sections.len(), self.marker);
        log::debug!("wheel settled at {} degrees on section {}", absolute, index);
        if let Some(listener) = &mut self.settle_listener {
            listener(index, absolute);
        }
    }

    pub fn composited(&self) -> Option<&Pixmap> {
        self.composited.as_ref()
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.degrees()
    }

    pub fn display_matrix(&self) -> [f64; 6] {
        self.rotation.matrix()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    /// Section currently under the marker, when sections have been set.
    pub fn selected_section_index(&self) -> Option<usize> {
        let sections = self.sections.as_ref()?;
        Some(selected_index(
            self.rotation.absolute_degrees(),
            sections.len(),
            self.marker,
        ))
    }
}

impl Default for WheelWidget {
    fn default() -> Self {
        Self::new()
    }
}
