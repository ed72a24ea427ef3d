// DSL input for the integration tests; users_gen.rs is its generated output.
use sqlgen::dsl::*;

/// A registered user.
#[derive(Table)]
pub struct User {
    #[tag = r#"identity:"true""#]
    pub UserID: i64,
    pub UserName: String,
    pub Sex: i32,
}

const user: User = entity();

/// Loads users by id.
pub fn GetUser(userID: i64) {
    From(user);
    SelectAll(user);
    Where(user.UserID == userID);
}

pub fn AddUser() {
    InsertAll(user);
}

pub fn RenameUser(name: String, userID: i64) {
    Update(user.UserName, name);
    Where(user.UserID == userID);
}

pub fn DeleteUser(userID: i64) {
    Delete(user);
    Where(user.UserID == userID && user.Sex == 0);
}

pub fn StreamUsers(sex: i32) {
    From(user);
    SelectAll(user);
    Where(user.Sex == sex);
    SetReturnType(ReturnRecordChannel);
    SetChannelBufferSize(1);
}

pub fn StreamAll() {
    SelectAll(user);
    OrderByDescending(user.UserID);
    SetReturnType(ReturnRecordChannel);
}
