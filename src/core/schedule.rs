/// Callback invoked once per tick; returning `false` ends the run.
pub type TickFn = Box<dyn FnMut() -> bool>;

/// Something that calls back once per frame.
///
/// The browser implementation is driven by `requestAnimationFrame`; tests use
/// [`ManualTicks`] to step deterministically.
pub trait TickSource {
    /// Begin delivering ticks, replacing any previous callback.
    fn start(&mut self, on_tick: TickFn);
    /// Stop delivering ticks and drop the callback.
    fn stop(&mut self);
    fn is_active(&self) -> bool;
}

/// Tick source advanced explicitly by the caller.
#[derive(Default)]
pub struct ManualTicks {
    on_tick: Option<TickFn>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver up to `n` ticks. Returns how many were delivered before the
    /// callback asked to stop (or `0` when inactive).
    pub fn advance(&mut self, n: usize) -> usize {
        let mut delivered = 0;
        while delivered < n {
            let Some(cb) = self.on_tick.as_mut() else {
                break;
            };
            delivered += 1;
            if !cb() {
                self.on_tick = None;
            }
        }
        delivered
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self, on_tick: TickFn) {
        self.on_tick = Some(on_tick);
    }

    fn stop(&mut self) {
        self.on_tick = None;
    }

    fn is_active(&self) -> bool {
        self.on_tick.is_some()
    }
}
