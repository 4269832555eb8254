use bistro::orders::{OrderStatus, PaymentMethod, TrackingStep};

pub(crate) fn status(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pendente",
        OrderStatus::Preparing => "Preparando",
        OrderStatus::Ready => "Pronto",
        OrderStatus::OnTheWay => "A caminho",
        OrderStatus::Delivered => "Entregue",
        OrderStatus::Cancelled => "Cancelado",
    }
}

pub(crate) fn payment(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::CreditCard => "Cartão de crédito",
        PaymentMethod::DebitCard => "Cartão de débito",
        PaymentMethod::Cash => "Dinheiro",
        PaymentMethod::Pix => "PIX",
    }
}

pub(crate) fn step(step: TrackingStep) -> &'static str {
    match step {
        TrackingStep::Preparing => "Preparando",
        TrackingStep::OnTheWay => "A caminho",
        TrackingStep::Delivered => "Entregue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_distinct_label() {
        let labels: Vec<&str> = OrderStatus::ALL.into_iter().map(status).collect();

        for (idx, label) in labels.iter().enumerate() {
            assert!(
                !labels.iter().skip(idx + 1).any(|other| other == label),
                "duplicate label {label}"
            );
        }
    }

    #[test]
    fn payment_labels() {
        assert_eq!(payment(PaymentMethod::Pix), "PIX");
        assert_eq!(payment(PaymentMethod::Cash), "Dinheiro");
    }
}
