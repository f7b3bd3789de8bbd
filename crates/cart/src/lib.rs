//! Cart aggregate for the web client.
//!
//! Lines are keyed by recipe id and created with the synthesized unit
//! price at the moment of adding, so a later price-policy change never
//! rewrites a cart the user already built.

use foodie_recipe::{Price, RecipeSummary};

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub recipe: RecipeSummary,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal_cents(&self) -> u64 {
        u64::from(self.unit_price.cents()) * u64::from(self.quantity)
    }
}

/// Order-preserving collection of cart lines. A line's quantity is always
/// at least 1; a quantity update that would drop to zero deletes the line
/// instead of persisting a zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the recipe: a new line at quantity 1, or an
    /// increment of the existing line.
    pub fn add(&mut self, recipe: RecipeSummary, unit_price: Price) {
        match self.lines.iter_mut().find(|line| line.recipe.id == recipe.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                recipe,
                unit_price,
                quantity: 1,
            }),
        }
    }

    /// Sets a line's quantity; zero removes the line. Unknown ids are
    /// ignored.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.recipe.id == id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|line| line.recipe.id != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.recipe.id == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total_cents(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal_cents).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodie_recipe::DerivedAttributes;

    fn summary(id: &str, name: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: String::new(),
            category: None,
            area: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn adding_twice_increments_one_line() {
        let mut cart = Cart::new();
        let price = DerivedAttributes::synthesize("52772").price;
        cart.add(summary("52772", "Teriyaki Chicken Casserole"), price);
        cart.add(summary("52772", "Teriyaki Chicken Casserole"), price);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("52772").unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_cents(), 2 * u64::from(price.cents()));
    }

    #[test]
    fn zero_quantity_deletes_the_line() {
        let mut cart = Cart::new();
        cart.add(summary("a", "Akki Rotti"), Price::from_cents(950));
        cart.set_quantity("a", 3);
        assert_eq!(cart.line("a").unwrap().quantity, 3);

        cart.set_quantity("a", 0);
        assert!(cart.line("a").is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn quantities_never_fall_below_one() {
        let mut cart = Cart::new();
        cart.add(summary("a", "Akki Rotti"), Price::from_cents(950));
        cart.set_quantity("a", 1);
        for line in cart.lines() {
            assert!(line.quantity >= 1);
        }
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut cart = Cart::new();
        cart.set_quantity("ghost", 4);
        cart.remove("ghost");
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_span_lines() {
        let mut cart = Cart::new();
        cart.add(summary("a", "Akki Rotti"), Price::from_cents(1000));
        cart.add(summary("b", "Bhatura"), Price::from_cents(250));
        cart.set_quantity("b", 4);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_cents(), 2000);
    }
}
