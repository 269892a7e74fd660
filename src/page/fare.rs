use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{FormState, Page, Surface};
use crate::api::predict_service::TripQuoteRequest;
use crate::error::FareError;

pub struct Submission {
    pub attempt: Uuid,
    pub route: JoinHandle<()>,
}

impl Submission {
    pub async fn route_drawn(self) {
        if let Err(e) = self.route.await {
            log::error!("route task for attempt {} failed: {e}", self.attempt);
        }
    }
}

// Shown on creation, cleared exactly once on drop.
struct BusyIndicator<'a> {
    surface: &'a dyn Surface,
}

impl<'a> BusyIndicator<'a> {
    fn show(surface: &'a dyn Surface) -> Self {
        surface.set_busy(true);
        Self { surface }
    }
}

impl Drop for BusyIndicator<'_> {
    fn drop(&mut self) {
        self.surface.set_busy(false);
    }
}

impl FormState {
    /// Whitespace-only addresses count as missing.
    pub fn is_complete(&self) -> bool {
        !self.pickup.trim().is_empty() && !self.dropoff.trim().is_empty()
    }

    pub fn to_request(&self) -> Result<TripQuoteRequest, FareError> {
        if !self.is_complete() {
            return Err(FareError::MissingInput);
        }

        Ok(TripQuoteRequest {
            pickup_address: self.pickup.clone(),
            dropoff_address: self.dropoff.clone(),
            payment_type: self.payment,
        })
    }
}

impl Page {
    /// Overlapping submissions are not guarded against. The last response
    /// applied is what the results panel shows.
    pub async fn submit(&self) -> Result<Submission, FareError> {
        let attempt = Uuid::new_v4();

        let request = match self.form().to_request() {
            Ok(request) => request,
            Err(e) => return Err(self.fail(attempt, e)),
        };

        let _busy = BusyIndicator::show(self.surface.as_ref());
        log::info!(
            "[{attempt}] requesting fare {} -> {} ({})",
            request.pickup_address,
            request.dropoff_address,
            request.payment_type
        );

        let quote = match self.predict.predict(&request).await {
            Ok(quote) => quote,
            Err(e) => return Err(self.fail(attempt, e)),
        };

        log::debug!("[{attempt}] quote {quote:?}");
        self.present(quote);

        let route = self
            .map
            .spawn_route(request.pickup_address, request.dropoff_address);

        Ok(Submission { attempt, route })
    }

    fn fail(&self, attempt: Uuid, e: FareError) -> FareError {
        match &e {
            FareError::MissingInput => log::info!("[{attempt}] {e}"),
            _ => log::error!("[{attempt}] {e}"),
        }
        self.surface.alert(e.alert_message());
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::predict_service::PaymentType;

    #[test]
    fn blank_addresses_are_missing_input() {
        let form = FormState {
            pickup: "  ".to_string(),
            dropoff: "JFK Airport".to_string(),
            payment: PaymentType::Cash,
        };
        assert!(matches!(form.to_request(), Err(FareError::MissingInput)));

        let form = FormState {
            pickup: "Times Square, NY".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.to_request(), Err(FareError::MissingInput)));
    }

    #[test]
    fn request_carries_form_fields() {
        let form = FormState {
            pickup: "Times Square, NY".to_string(),
            dropoff: "JFK Airport".to_string(),
            payment: PaymentType::Cash,
        };

        let request = form.to_request().unwrap();
        assert_eq!(request.pickup_address, "Times Square, NY");
        assert_eq!(request.dropoff_address, "JFK Airport");
        assert_eq!(request.payment_type, PaymentType::Cash);
    }
}
