//! Customer operations over GraphQL
//!
//! Transport failures propagate; absent data comes back as `None`, `false`
//! or an empty list.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use crate::{error::ClientError, graphql_client::GraphQlClient, models::Customer};

const CUSTOMER_FIELDS: &str = "id firstName lastName contact email dateOfBirth";

#[derive(Clone)]
pub struct CustomerService {
    client: Arc<dyn GraphQlClient>,
}

impl CustomerService {
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self { client }
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>, ClientError> {
        info!("Fetching all customers");

        let query = format!("query {{ customers {{ {CUSTOMER_FIELDS} }} }}");
        let customers = self
            .client
            .execute(&query, None)
            .await
            .inspect_err(|e| error!("Error fetching customers: {}", e))?
            .data()
            .customers
            .unwrap_or_default();

        info!("Successfully fetched {} customers", customers.len());
        Ok(customers)
    }

    pub async fn get_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ClientError> {
        info!("Fetching customer with ID: {}", id);

        let query = format!("query($id: Int!) {{ customer(id: $id) {{ {CUSTOMER_FIELDS} }} }}");
        let customer = self
            .client
            .execute(&query, Some(json!({ "id": id })))
            .await
            .inspect_err(|e| error!("Error fetching customer with ID {}: {}", id, e))?
            .data()
            .customer;

        match &customer {
            Some(customer) => info!("Successfully fetched customer: {}", customer.full_name()),
            None => warn!("Customer with ID {} not found", id),
        }
        Ok(customer)
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Option<Customer>, ClientError> {
        info!("Creating new customer: {}", customer.full_name());

        let mutation = format!(
            "mutation($firstName: String!, $lastName: String!, $contact: String!, $email: String!, $dateOfBirth: DateTime!) {{ \
             addCustomer(firstName: $firstName, lastName: $lastName, contact: $contact, email: $email, dateOfBirth: $dateOfBirth) {{ {CUSTOMER_FIELDS} }} }}"
        );
        let variables = json!({
            "firstName": customer.first_name,
            "lastName": customer.last_name,
            "contact": customer.contact,
            "email": customer.email,
            "dateOfBirth": customer.date_of_birth,
        });

        let created = self
            .client
            .execute(&mutation, Some(variables))
            .await
            .inspect_err(|e| error!("Error creating customer {}: {}", customer.full_name(), e))?
            .data()
            .add_customer;

        match &created {
            Some(created) => info!("Successfully created customer with ID: {}", created.id),
            None => warn!("Failed to create customer: GraphQL service returned null"),
        }
        Ok(created)
    }

    pub async fn update_customer(&self, customer: &Customer) -> Result<Option<Customer>, ClientError> {
        info!("Updating customer with ID: {}", customer.id);

        let mutation = format!(
            "mutation($id: Int!, $firstName: String!, $lastName: String!, $contact: String!, $email: String!, $dateOfBirth: DateTime!) {{ \
             updateCustomer(id: $id, firstName: $firstName, lastName: $lastName, contact: $contact, email: $email, dateOfBirth: $dateOfBirth) {{ {CUSTOMER_FIELDS} }} }}"
        );
        let variables = json!({
            "id": customer.id,
            "firstName": customer.first_name,
            "lastName": customer.last_name,
            "contact": customer.contact,
            "email": customer.email,
            "dateOfBirth": customer.date_of_birth,
        });

        let updated = self
            .client
            .execute(&mutation, Some(variables))
            .await
            .inspect_err(|e| error!("Error updating customer with ID {}: {}", customer.id, e))?
            .data()
            .update_customer;

        match &updated {
            Some(updated) => info!("Successfully updated customer with ID: {}", updated.id),
            None => warn!(
                "Failed to update customer with ID {}: GraphQL service returned null",
                customer.id
            ),
        }
        Ok(updated)
    }

    pub async fn delete_customer(&self, id: i32) -> Result<bool, ClientError> {
        info!("Deleting customer with ID: {}", id);

        let deleted = self
            .client
            .execute("mutation($id: Int!) { deleteCustomer(id: $id) }", Some(json!({ "id": id })))
            .await
            .inspect_err(|e| error!("Error deleting customer with ID {}: {}", id, e))?
            .data()
            .delete_customer
            .unwrap_or(false);

        if deleted {
            info!("Successfully deleted customer with ID: {}", id);
        } else {
            warn!("Failed to delete customer with ID {}: GraphQL service returned false", id);
        }
        Ok(deleted)
    }
}
