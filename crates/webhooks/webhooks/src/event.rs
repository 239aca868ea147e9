//! Webhook event taxonomy.
//!
//! Every event Razorpay sends is `<domain>.<action>`, where the domain path
//! may itself contain a dot (`payment.dispute`). Routing uses the flat
//! [`WebhookEvent`] enum; [`EventDomain`] and [`WebhookEvent::action`] give
//! the decomposed view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WebhookError;

/// Resource domain an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDomain {
    Order,
    Payment,
    Refund,
    Dispute,
    Invoice,
    Subscription,
    Settlement,
    VirtualAccount,
}

impl EventDomain {
    /// All domains.
    pub const ALL: [EventDomain; 8] = [
        EventDomain::Order,
        EventDomain::Payment,
        EventDomain::Refund,
        EventDomain::Dispute,
        EventDomain::Invoice,
        EventDomain::Subscription,
        EventDomain::Settlement,
        EventDomain::VirtualAccount,
    ];

    /// Domain path as it appears in the event string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventDomain::Order => "order",
            EventDomain::Payment => "payment",
            EventDomain::Refund => "refund",
            EventDomain::Dispute => "payment.dispute",
            EventDomain::Invoice => "invoice",
            EventDomain::Subscription => "subscription",
            EventDomain::Settlement => "settlement",
            EventDomain::VirtualAccount => "virtual_account",
        }
    }

    /// Events in this domain.
    pub fn events(&self) -> impl Iterator<Item = WebhookEvent> + '_ {
        WebhookEvent::ALL
            .into_iter()
            .filter(move |event| event.domain() == *self)
    }
}

impl fmt::Display for EventDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! webhook_events {
    (@count) => { 0 };
    (@count $head:ident $($tail:ident)*) => { 1 + webhook_events!(@count $($tail)*) };
    ($( $(#[$doc:meta])* $variant:ident => ($domain:ident, $action:literal, $literal:literal), )*) => {
        /// A webhook event type Razorpay can deliver.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum WebhookEvent {
            $( $(#[$doc])* $variant, )*
        }

        impl WebhookEvent {
            /// Every known event, in the order Razorpay documents them.
            pub const ALL: [WebhookEvent; webhook_events!(@count $($variant)*)] = [
                $( WebhookEvent::$variant, )*
            ];

            /// The exact event string, e.g. `payment.dispute.created`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( WebhookEvent::$variant => $literal, )*
                }
            }

            /// The domain this event belongs to.
            pub fn domain(&self) -> EventDomain {
                match self {
                    $( WebhookEvent::$variant => EventDomain::$domain, )*
                }
            }

            /// The leaf action, e.g. `created`.
            pub fn action(&self) -> &'static str {
                match self {
                    $( WebhookEvent::$variant => $action, )*
                }
            }
        }

        impl FromStr for WebhookEvent {
            type Err = WebhookError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $literal => Ok(WebhookEvent::$variant), )*
                    other => Err(WebhookError::UnsupportedEvent(other.to_string())),
                }
            }
        }
    };
}

webhook_events! {
    /// An order is successfully paid.
    OrderPaid => (Order, "paid", "order.paid"),
    /// A payment is authorized.
    PaymentAuthorized => (Payment, "authorized", "payment.authorized"),
    /// A payment is successfully captured.
    PaymentCaptured => (Payment, "captured", "payment.captured"),
    /// A payment fails.
    PaymentFailed => (Payment, "failed", "payment.failed"),
    /// A refund is created.
    RefundCreated => (Refund, "created", "refund.created"),
    /// The customer's issuing bank raised a dispute against a payment.
    DisputeCreated => (Dispute, "created", "payment.dispute.created"),
    /// The merchant won a dispute.
    DisputeWon => (Dispute, "won", "payment.dispute.won"),
    /// The merchant lost a dispute.
    DisputeLost => (Dispute, "lost", "payment.dispute.lost"),
    /// A dispute is closed.
    DisputeClosed => (Dispute, "closed", "payment.dispute.closed"),
    /// A partial payment is made against an invoice.
    InvoicePartiallyPaid => (Invoice, "partially_paid", "invoice.partially_paid"),
    /// An invoice is successfully paid.
    InvoicePaid => (Invoice, "paid", "invoice.paid"),
    /// An invoice expires.
    InvoiceExpired => (Invoice, "expired", "invoice.expired"),
    /// A subscription moves to the `active` state.
    SubscriptionActivated => (Subscription, "activated", "subscription.activated"),
    /// A successful charge is made on a subscription.
    SubscriptionCharged => (Subscription, "charged", "subscription.charged"),
    /// All invoices of a subscription are generated.
    SubscriptionCompleted => (Subscription, "completed", "subscription.completed"),
    /// A subscription is updated. No state change.
    SubscriptionUpdated => (Subscription, "updated", "subscription.updated"),
    /// A charge on a subscription failed and it moved to `pending`.
    SubscriptionPending => (Subscription, "pending", "subscription.pending"),
    /// Retries are exhausted and the subscription moved to `halted`.
    SubscriptionHalted => (Subscription, "halted", "subscription.halted"),
    /// A subscription is cancelled.
    SubscriptionCancelled => (Subscription, "cancelled", "subscription.cancelled"),
    /// A transfer to a linked account is settled with the parent merchant.
    SettlementProcessed => (Settlement, "processed", "settlement.processed"),
    /// A virtual account is created.
    VirtualAccountCreated => (VirtualAccount, "created", "virtual_account.created"),
    /// A payment is made to a virtual account.
    VirtualAccountCredited => (VirtualAccount, "credited", "virtual_account.credited"),
    /// A virtual account expires or is closed.
    VirtualAccountClosed => (VirtualAccount, "closed", "virtual_account.closed"),
}

impl WebhookEvent {
    /// Looks up an event by its decomposed `(domain, action)` pair.
    pub fn from_parts(domain: EventDomain, action: &str) -> Option<WebhookEvent> {
        domain.events().find(|event| event.action() == action)
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WebhookEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
