/// Contact details of the person who placed an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

impl Customer {
    /// Creates a customer without a postal address.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `email` - Contact email
    /// * `phone` - Contact phone number
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
