//! Account operations and the integrity rules that hang off account email.

use orgdesk_shared::constants::MIN_PASSWORD_LEN;
use orgdesk_shared::{
    normalize_email, same_email, AccountId, ConflictError, DeskError, DeskResult,
    ForbiddenError, Role, ValidationError,
};

use crate::models::{Account, AccountUpdate, NewAccount, ProfileUpdate, Registration};
use crate::store::EntityStore;

/// What [`EntityStore::delete_account`] removed.
#[derive(Debug, Clone)]
pub struct DeletedAccount {
    pub account: Account,
    pub employees_removed: usize,
    pub requests_removed: usize,
}

impl EntityStore {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn find_account(&self, id: &AccountId) -> Option<&Account> {
        self.data.accounts.iter().find(|a| &a.id == id)
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        self.data
            .accounts
            .iter()
            .find(|a| same_email(&a.email, email))
    }

    /// All accounts in insertion order.
    pub fn list_accounts(&self) -> Vec<Account> {
        self.data.accounts.clone()
    }

    pub fn admin_count(&self) -> usize {
        self.data.accounts.iter().filter(|a| a.is_admin()).count()
    }

    fn email_taken(&self, email: &str, except: Option<&AccountId>) -> bool {
        self.data
            .accounts
            .iter()
            .any(|a| same_email(&a.email, email) && Some(&a.id) != except)
    }

    fn account_index(&self, id: &AccountId) -> DeskResult<usize> {
        self.data
            .accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| DeskError::not_found("account", id))
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Self-registration: unverified, `Role::Employee`.
    pub fn register_account(&mut self, input: Registration) -> DeskResult<Account> {
        self.insert_account(NewAccount {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            role: Role::Employee,
            verified: false,
        })
    }

    /// Admin path: role and verification chosen by the caller.
    pub fn create_account(&mut self, input: NewAccount) -> DeskResult<Account> {
        self.insert_account(input)
    }

    fn insert_account(&mut self, input: NewAccount) -> DeskResult<Account> {
        let email = checked_email(&input.email)?;
        if self.email_taken(&email, None) {
            return Err(ConflictError::EmailTaken.into());
        }
        check_password(&input.password)?;

        let account = Account {
            id: AccountId::generate(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email,
            password: input.password,
            verified: input.verified,
            role: input.role,
        };
        self.data.accounts.push(account.clone());
        self.commit();

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            role = %account.role,
            "account created"
        );
        Ok(account)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Admin edit.  An email change is carried over to every employee and
    /// request that referenced the old address, in the same mutation.
    pub fn update_account(&mut self, id: &AccountId, input: AccountUpdate) -> DeskResult<Account> {
        let idx = self.account_index(id)?;
        let email = checked_email(&input.email)?;
        if self.email_taken(&email, Some(id)) {
            return Err(ConflictError::EmailTaken.into());
        }
        let password = non_blank(input.password);
        if let Some(ref pw) = password {
            check_password(pw)?;
        }

        let current = &self.data.accounts[idx];
        if current.is_admin() && !input.role.is_admin() && self.admin_count() <= 1 {
            return Err(ForbiddenError::LastAdmin.into());
        }

        let old_email = current.email.clone();
        let account = &mut self.data.accounts[idx];
        account.first_name = input.first_name.trim().to_string();
        account.last_name = input.last_name.trim().to_string();
        account.email = email.clone();
        account.role = input.role;
        account.verified = input.verified;
        if let Some(pw) = password {
            account.password = pw;
        }
        let updated = account.clone();

        if old_email != email {
            self.propagate_email(&old_email, &email);
        }
        self.commit();

        tracing::info!(account_id = %id, email = %updated.email, "account updated");
        Ok(updated)
    }

    /// Self edit from the profile screen.
    pub fn update_profile(&mut self, id: &AccountId, input: ProfileUpdate) -> DeskResult<Account> {
        let idx = self.account_index(id)?;
        let password = non_blank(input.password);
        if let Some(ref pw) = password {
            check_password(pw)?;
        }

        let account = &mut self.data.accounts[idx];
        account.first_name = input.first_name.trim().to_string();
        account.last_name = input.last_name.trim().to_string();
        if let Some(pw) = password {
            account.password = pw;
        }
        let updated = account.clone();
        self.commit();

        tracing::info!(account_id = %id, "profile updated");
        Ok(updated)
    }

    pub fn reset_password(&mut self, id: &AccountId, new_password: &str) -> DeskResult<()> {
        let idx = self.account_index(id)?;
        check_password(new_password)?;

        self.data.accounts[idx].password = new_password.to_string();
        self.commit();

        tracing::info!(account_id = %id, "password reset");
        Ok(())
    }

    /// Mark the account registered under `email` as verified.
    pub fn verify_account(&mut self, email: &str) -> DeskResult<Account> {
        let account = self
            .data
            .accounts
            .iter_mut()
            .find(|a| same_email(&a.email, email))
            .ok_or_else(|| DeskError::not_found("account", email))?;
        account.verified = true;
        let verified = account.clone();
        self.commit();

        tracing::info!(account_id = %verified.id, "email verified");
        Ok(verified)
    }

    /// Rewrite every employee/request reference from `old` to `new`.
    fn propagate_email(&mut self, old: &str, new: &str) {
        let mut employees = 0usize;
        for employee in self
            .data
            .employees
            .iter_mut()
            .filter(|e| same_email(&e.user_email, old))
        {
            employee.user_email = new.to_string();
            employees += 1;
        }

        let mut requests = 0usize;
        for request in self
            .data
            .requests
            .iter_mut()
            .filter(|r| same_email(&r.employee_email, old))
        {
            request.employee_email = new.to_string();
            requests += 1;
        }

        tracing::debug!(old, new, employees, requests, "email references updated");
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete an account and everything owned through its email.
    ///
    /// `session` is the currently authenticated account, which may never
    /// delete itself.  The last admin cannot be deleted either.
    pub fn delete_account(
        &mut self,
        id: &AccountId,
        session: Option<&AccountId>,
    ) -> DeskResult<DeletedAccount> {
        let idx = self.account_index(id)?;
        if session == Some(id) {
            return Err(ForbiddenError::SelfDelete.into());
        }
        if self.data.accounts[idx].is_admin() && self.admin_count() <= 1 {
            return Err(ForbiddenError::LastAdmin.into());
        }

        let account = self.data.accounts.remove(idx);

        let employees_before = self.data.employees.len();
        self.data
            .employees
            .retain(|e| !same_email(&e.user_email, &account.email));
        let requests_before = self.data.requests.len();
        self.data
            .requests
            .retain(|r| !same_email(&r.employee_email, &account.email));

        let deleted = DeletedAccount {
            employees_removed: employees_before - self.data.employees.len(),
            requests_removed: requests_before - self.data.requests.len(),
            account,
        };
        self.commit();

        tracing::info!(
            account_id = %id,
            employees = deleted.employees_removed,
            requests = deleted.requests_removed,
            "account deleted"
        );
        Ok(deleted)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn checked_email(raw: &str) -> DeskResult<String> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(ValidationError::Required("email").into());
    }
    Ok(email)
}

fn check_password(password: &str) -> DeskResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }
    Ok(())
}

fn non_blank(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orgdesk_shared::constants::SEED_ADMIN_ID;
    use orgdesk_shared::{DepartmentId, EmployeeRecordId, RequestId, RequestStatus};

    use super::*;
    use crate::models::{Employee, Request, RequestItem};
    use crate::store::test_support::seeded_store;

    fn admin_id() -> AccountId {
        AccountId::from(SEED_ADMIN_ID)
    }

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "Jo".into(),
            last_name: "March".into(),
            email: email.into(),
            password: "secret1".into(),
        }
    }

    fn edit_of(account: &Account) -> AccountUpdate {
        AccountUpdate {
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            role: account.role,
            verified: account.verified,
            password: None,
        }
    }

    fn add_references(store: &mut EntityStore, email: &str, code: &str) {
        store.data.employees.push(Employee {
            id: EmployeeRecordId::generate(),
            employee_id: code.into(),
            user_email: email.into(),
            position: "Clerk".into(),
            department_id: DepartmentId::from("dept1"),
            hire_date: None,
        });
        store.data.requests.push(Request {
            id: RequestId::generate(),
            kind: "Leave".into(),
            items: vec![RequestItem {
                name: "Day off".into(),
                qty: 1,
            }],
            status: RequestStatus::Pending,
            date: Utc::now(),
            employee_email: email.into(),
        });
    }

    #[test]
    fn register_creates_unverified_employee() {
        let mut store = seeded_store();
        let account = store.register_account(registration("  Jo@Example.com ")).unwrap();

        assert_eq!(account.email, "jo@example.com");
        assert!(!account.verified);
        assert_eq!(account.role, Role::Employee);
    }

    #[test]
    fn duplicate_email_rejected_case_insensitively() {
        let mut store = seeded_store();
        store.register_account(registration("jo@example.com")).unwrap();

        let err = store
            .register_account(registration("JO@EXAMPLE.COM"))
            .unwrap_err();
        assert_eq!(err, DeskError::Conflict(ConflictError::EmailTaken));
        assert_eq!(store.list_accounts().len(), 2);
    }

    #[test]
    fn admin_create_requires_six_char_password() {
        let mut store = seeded_store();
        let err = store
            .create_account(NewAccount {
                email: "x@example.com".into(),
                password: "12345".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            DeskError::Validation(ValidationError::TooShort { min: 6 })
        );

        let account = store
            .create_account(NewAccount {
                first_name: "New".into(),
                last_name: "Admin".into(),
                email: "x@example.com".into(),
                password: "123456".into(),
                role: Role::Admin,
                verified: true,
            })
            .unwrap();
        assert!(account.is_admin());
        assert_eq!(store.admin_count(), 2);
    }

    #[test]
    fn update_rejects_collision_with_other_account() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();

        let mut edit = edit_of(&jo);
        edit.email = "Admin@Example.com".into();
        assert_eq!(
            store.update_account(&jo.id, edit).unwrap_err(),
            DeskError::Conflict(ConflictError::EmailTaken)
        );

        // keeping one's own email (different case) is fine
        let mut edit = edit_of(&jo);
        edit.email = "JO@example.com".into();
        assert!(store.update_account(&jo.id, edit).is_ok());
    }

    #[test]
    fn email_change_moves_every_reference() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();
        let amy = store.register_account(registration("amy@example.com")).unwrap();
        add_references(&mut store, "JO@example.com", "E1");
        add_references(&mut store, "amy@example.com", "E2");

        let mut edit = edit_of(&jo);
        edit.email = "josephine@example.com".into();
        store.update_account(&jo.id, edit).unwrap();

        let data = store.dataset();
        assert!(data
            .employees
            .iter()
            .all(|e| !same_email(&e.user_email, "jo@example.com")));
        assert_eq!(
            data.employees
                .iter()
                .filter(|e| e.user_email == "josephine@example.com")
                .count(),
            1
        );
        assert_eq!(
            data.requests
                .iter()
                .filter(|r| r.employee_email == "josephine@example.com")
                .count(),
            1
        );
        assert!(data
            .requests
            .iter()
            .any(|r| same_email(&r.employee_email, &amy.email)));
    }

    #[test]
    fn invalid_password_on_update_changes_nothing() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();
        add_references(&mut store, "jo@example.com", "E1");

        let mut edit = edit_of(&jo);
        edit.email = "new@example.com".into();
        edit.first_name = "Changed".into();
        edit.password = Some("123".into());
        assert!(store.update_account(&jo.id, edit).is_err());

        let stored = store.find_account(&jo.id).unwrap();
        assert_eq!(stored, &jo);
        assert_eq!(store.dataset().employees[0].user_email, "jo@example.com");
    }

    #[test]
    fn blank_password_keeps_existing() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();

        let mut edit = edit_of(&jo);
        edit.password = Some("   ".into());
        let updated = store.update_account(&jo.id, edit).unwrap();
        assert_eq!(updated.password, "secret1");
    }

    #[test]
    fn cannot_demote_last_admin() {
        let mut store = seeded_store();
        let admin = store.find_account(&admin_id()).unwrap().clone();
        let mut edit = edit_of(&admin);
        edit.role = Role::Employee;

        assert_eq!(
            store.update_account(&admin.id, edit).unwrap_err(),
            DeskError::Forbidden(ForbiddenError::LastAdmin)
        );
    }

    #[test]
    fn update_missing_account_is_not_found() {
        let mut store = seeded_store();
        let err = store
            .update_account(&AccountId::from("ghost"), AccountUpdate {
                email: "g@example.com".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DeskError::NotFound { entity: "account", .. }));
    }

    #[test]
    fn reset_password_validates_length() {
        let mut store = seeded_store();
        assert_eq!(
            store.reset_password(&admin_id(), "abc").unwrap_err(),
            DeskError::Validation(ValidationError::TooShort { min: 6 })
        );
        store.reset_password(&admin_id(), "abcdef").unwrap();
        assert_eq!(store.find_account(&admin_id()).unwrap().password, "abcdef");
    }

    #[test]
    fn profile_update_keeps_email_and_role() {
        let mut store = seeded_store();
        let updated = store
            .update_profile(&admin_id(), ProfileUpdate {
                first_name: " Root ".into(),
                last_name: "Admin".into(),
                password: None,
            })
            .unwrap();
        assert_eq!(updated.first_name, "Root");
        assert_eq!(updated.email, "admin@example.com");
        assert!(updated.is_admin());
    }

    #[test]
    fn delete_cascades_exactly_matching_rows() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();
        store.register_account(registration("amy@example.com")).unwrap();
        add_references(&mut store, "Jo@Example.com", "E1");
        add_references(&mut store, "amy@example.com", "E2");

        let deleted = store.delete_account(&jo.id, Some(&admin_id())).unwrap();

        assert_eq!(deleted.employees_removed, 1);
        assert_eq!(deleted.requests_removed, 1);
        assert!(store.find_account(&jo.id).is_none());
        assert_eq!(store.dataset().employees.len(), 1);
        assert_eq!(store.dataset().employees[0].user_email, "amy@example.com");
        assert_eq!(store.dataset().requests.len(), 1);
    }

    #[test]
    fn cannot_delete_self_regardless_of_role() {
        let mut store = seeded_store();
        let jo = store.register_account(registration("jo@example.com")).unwrap();

        assert_eq!(
            store.delete_account(&jo.id, Some(&jo.id)).unwrap_err(),
            DeskError::Forbidden(ForbiddenError::SelfDelete)
        );

        store
            .create_account(NewAccount {
                email: "second@example.com".into(),
                password: "123456".into(),
                role: Role::Admin,
                verified: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            store
                .delete_account(&admin_id(), Some(&admin_id()))
                .unwrap_err(),
            DeskError::Forbidden(ForbiddenError::SelfDelete)
        );
    }

    #[test]
    fn last_admin_cannot_be_deleted() {
        let mut store = seeded_store();
        assert_eq!(
            store.delete_account(&admin_id(), None).unwrap_err(),
            DeskError::Forbidden(ForbiddenError::LastAdmin)
        );

        let second = store
            .create_account(NewAccount {
                email: "second@example.com".into(),
                password: "123456".into(),
                role: Role::Admin,
                verified: true,
                ..Default::default()
            })
            .unwrap();
        store.delete_account(&admin_id(), Some(&second.id)).unwrap();
        assert_eq!(store.admin_count(), 1);
    }

    #[test]
    fn verify_account_flips_flag() {
        let mut store = seeded_store();
        store.register_account(registration("jo@example.com")).unwrap();
        let account = store.verify_account("JO@example.com").unwrap();
        assert!(account.verified);
        assert!(store.verify_account("nobody@example.com").is_err());
    }
}
