//! Step-by-step order wizard
//!
//! A four-step linear flow (pizza, size, quantity, address) driven one input
//! line at a time. The wizard only validates and collects; placing the order
//! is up to the caller.

use std::ops::RangeInclusive;

use pizza_common::{OrderRequest, Pizza, Size};

/// Inputs that end the session at any step
pub const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Quantities the wizard accepts
pub const QUANTITY_RANGE: RangeInclusive<u32> = 1..=5;

/// Placeholders the wizard does not ask for
pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const DEFAULT_PHONE: &str = "9876543210";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChoosePizza,
    ChooseSize,
    ChooseQuantity,
    EnterAddress,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ChoosePizza => 1,
            WizardStep::ChooseSize => 2,
            WizardStep::ChooseQuantity => 3,
            WizardStep::EnterAddress => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ChoosePizza => "Choose Pizza",
            WizardStep::ChooseSize => "Choose Size",
            WizardStep::ChooseQuantity => "Quantity",
            WizardStep::EnterAddress => "Delivery",
        }
    }

    /// Hint printed under the step heading
    pub fn hint(&self) -> &'static str {
        match self {
            WizardStep::ChoosePizza => "Say: 'menu' then pizza number",
            WizardStep::ChooseSize => "Say: s=small, m=medium, l=large",
            WizardStep::ChooseQuantity => "Say: 1, 2, 3, 4, or 5",
            WizardStep::EnterAddress => "Say: '123 Road, YourName'",
        }
    }
}

/// A finished draft, ready for `placeOrder`
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOrder {
    pub pizza_name: String,
    pub request: OrderRequest,
}

/// What the caller should do after feeding one line
#[derive(Debug, Clone, PartialEq)]
pub enum WizardReply {
    Quit,
    ShowMenu,
    /// Input accepted; `message` confirms it and the wizard moved on
    Accepted { message: String, next: WizardStep },
    /// Input rejected; the step is unchanged
    Invalid(String),
    /// Final step accepted; the wizard has reset to step 1
    Complete(CompletedOrder),
}

#[derive(Debug, Default, Clone)]
struct Draft {
    pizza: Option<(u32, String)>,
    size: Option<Size>,
    quantity: Option<u32>,
}

/// Four-step order state machine
#[derive(Debug, Clone)]
pub struct OrderWizard {
    menu: Vec<Pizza>,
    step: WizardStep,
    draft: Draft,
}

impl OrderWizard {
    pub fn new(menu: Vec<Pizza>) -> Self {
        Self {
            menu,
            step: WizardStep::ChoosePizza,
            draft: Draft::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn menu(&self) -> &[Pizza] {
        &self.menu
    }

    /// Back to step 1 with an empty draft
    pub fn reset(&mut self) {
        self.step = WizardStep::ChoosePizza;
        self.draft = Draft::default();
    }

    /// Feed one line of user input
    pub fn handle(&mut self, input: &str) -> WizardReply {
        let input = input.trim().to_lowercase();
        if QUIT_WORDS.contains(&input.as_str()) {
            return WizardReply::Quit;
        }

        match self.step {
            WizardStep::ChoosePizza => self.choose_pizza(&input),
            WizardStep::ChooseSize => self.choose_size(&input),
            WizardStep::ChooseQuantity => self.choose_quantity(&input),
            WizardStep::EnterAddress => self.enter_address(&input),
        }
    }

    fn choose_pizza(&mut self, input: &str) -> WizardReply {
        if input.contains("menu") {
            return WizardReply::ShowMenu;
        }

        let Ok(id) = input.parse::<u32>() else {
            return WizardReply::Invalid(format!("Say a pizza number {}", self.id_hint()));
        };

        match self.menu.iter().find(|p| p.id == id) {
            Some(pizza) => {
                let message = format!("{} selected!", pizza.name);
                self.draft.pizza = Some((pizza.id, pizza.name.clone()));
                self.advance(WizardStep::ChooseSize, message)
            }
            None => WizardReply::Invalid(format!("Pizza {} only!", self.id_hint())),
        }
    }

    fn choose_size(&mut self, input: &str) -> WizardReply {
        match input.parse::<Size>() {
            Ok(size) => {
                self.draft.size = Some(size);
                let message = format!("{} size selected!", title_case(size.as_str()));
                self.advance(WizardStep::ChooseQuantity, message)
            }
            Err(_) => WizardReply::Invalid("Say: s, m, l, small, medium, large".to_string()),
        }
    }

    fn choose_quantity(&mut self, input: &str) -> WizardReply {
        let range = format!("{}-{}", QUANTITY_RANGE.start(), QUANTITY_RANGE.end());
        match input.parse::<u32>() {
            Ok(qty) if QUANTITY_RANGE.contains(&qty) => {
                self.draft.quantity = Some(qty);
                self.advance(WizardStep::EnterAddress, format!("{} pizza(s) selected!", qty))
            }
            Ok(_) => WizardReply::Invalid(format!("Quantity {} only!", range)),
            Err(_) => WizardReply::Invalid(format!("Say number {}", range)),
        }
    }

    fn enter_address(&mut self, input: &str) -> WizardReply {
        if input.split_whitespace().count() < 2 {
            return WizardReply::Invalid("Say full address: '123 Road, YourName'".to_string());
        }

        let draft = std::mem::take(&mut self.draft);
        self.step = WizardStep::ChoosePizza;

        match (draft.pizza, draft.size, draft.quantity) {
            (Some((pizza_id, pizza_name)), Some(size), Some(quantity)) => {
                WizardReply::Complete(CompletedOrder {
                    pizza_name,
                    request: OrderRequest {
                        pizza_id,
                        size,
                        quantity,
                        address: title_case(input),
                        customer_name: DEFAULT_CUSTOMER_NAME.to_string(),
                        phone: DEFAULT_PHONE.to_string(),
                    },
                })
            }
            _ => WizardReply::Invalid("Order incomplete, starting over".to_string()),
        }
    }

    fn advance(&mut self, next: WizardStep, message: String) -> WizardReply {
        self.step = next;
        WizardReply::Accepted { message, next }
    }

    fn id_hint(&self) -> String {
        let ids: Vec<String> = self.menu.iter().map(|p| p.id.to_string()).collect();
        match (ids.first(), ids.last()) {
            (Some(first), Some(last)) if ids.len() > 1 => format!("{}-{}", first, last),
            (Some(only), _) => only.clone(),
            _ => "(menu is empty)".to_string(),
        }
    }
}

/// Uppercase the first letter of every word, lowercase the rest
///
/// A "word" starts at any letter not preceded by another letter, so
/// `"123 main road"` becomes `"123 Main Road"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
