pub const ABOUT_TEXT: &str = "\
NYC Taxi Fare Estimator

Enter a pickup and a dropoff address anywhere in New York City and choose how \
you will pay. The estimate comes from a model trained on NYC yellow taxi trip \
records, plus the standard surcharges (extra, congestion, MTA tax and \
improvement surcharge). Trips between JFK and Manhattan use the flat rate.

This is an estimate only. Actual fare may vary.";

#[derive(Debug, Default)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
    Elsewhere,
}

#[derive(Debug, Default)]
pub struct InfoOverlay {
    visible: bool,
}

impl InfoOverlay {
    pub fn about_clicked(&mut self, event: &mut ClickEvent) {
        event.prevent_default();
        self.visible = true;
    }

    pub fn close_clicked(&mut self) {
        self.visible = false;
    }

    pub fn window_clicked(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
