// Code generated by sqlgen from users.rs; do not edit.
#![allow(clippy::all, dead_code, non_snake_case, unused_imports)]

use sqlgen::runtime::{CancellationToken, Context, DbError, ExecResult, Executor, Row, Value, tokio};

/// A registered user.
#[derive(Debug, Clone, Default)]
pub struct User {
    /// sql: identity:"true"
    pub UserID: i64,
    pub UserName: String,
    pub Sex: i32,
}

/// Loads users by id.
pub async fn GetUser(db: &dyn Executor, ctx: &Context, userID: i64) -> Result<Vec<User>, DbError> {
    const QUERY: &str = "SELECT UserID, UserName, Sex\nFROM User\nWHERE UserID = ?\n";

    fn read_row(row: &Row) -> Result<User, DbError> {
        Ok(User {
            UserID: row.get(0)?,
            UserName: row.get(1)?,
            Sex: row.get(2)?,
            ..User::default()
        })
    }

    let mut rows = db.query(ctx, QUERY, &[Value::from(userID.clone())]).await?;
    let mut result = Vec::new();
    while let Some(row) = rows.next().await? {
        result.push(read_row(&row)?);
    }
    Ok(result)
}

pub async fn AddUser(db: &dyn Executor, ctx: &Context, o: &User) -> Result<ExecResult, DbError> {
    const QUERY: &str = "INSERT INTO User(UserName,Sex)\nVALUES(?,?)";

    db.exec(ctx, QUERY, &[Value::from(o.UserName.clone()), Value::from(o.Sex.clone())]).await
}

pub async fn RenameUser(db: &dyn Executor, ctx: &Context, name: String, userID: i64) -> Result<ExecResult, DbError> {
    const QUERY: &str = "UPDATE User\nSET UserName = ?\nWHERE UserID = ?\n";

    db.exec(ctx, QUERY, &[Value::from(name.clone()), Value::from(userID.clone())]).await
}

pub async fn DeleteUser(db: &dyn Executor, ctx: &Context, userID: i64) -> Result<ExecResult, DbError> {
    const QUERY: &str = "DELETE User\nWHERE UserID = ? AND Sex = 0\n";

    db.exec(ctx, QUERY, &[Value::from(userID.clone())]).await
}

pub async fn StreamUsers(db: &dyn Executor, ctx: &Context, sex: i32) -> Result<(tokio::sync::mpsc::Receiver<Result<User, DbError>>, CancellationToken), DbError> {
    const QUERY: &str = "SELECT UserID, UserName, Sex\nFROM User\nWHERE Sex = ?\n";

    fn read_row(row: &Row) -> Result<User, DbError> {
        Ok(User {
            UserID: row.get(0)?,
            UserName: row.get(1)?,
            Sex: row.get(2)?,
            ..User::default()
        })
    }

    let mut rows = db.query(ctx, QUERY, &[Value::from(sex.clone())]).await?;
    let cancel = ctx.child_token();
    let token = cancel.clone();
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                next = rows.next() => next,
            };
            let item = match next {
                Ok(Some(row)) => read_row(&row),
                Ok(None) => break,
                Err(err) => Err(err),
            };
            let failed = item.is_err();
            let sent = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                sent = tx.send(item) => sent,
            };
            if sent.is_err() || failed {
                break;
            }
        }
        drop(rows);
        drop(tx);
    });
    Ok((rx, cancel))
}

pub async fn StreamAll(db: &dyn Executor, ctx: &Context) -> Result<(tokio::sync::mpsc::UnboundedReceiver<Result<User, DbError>>, CancellationToken), DbError> {
    const QUERY: &str = "SELECT UserID, UserName, Sex\nFROM User\nORDER BY UserID DESC\n";

    fn read_row(row: &Row) -> Result<User, DbError> {
        Ok(User {
            UserID: row.get(0)?,
            UserName: row.get(1)?,
            Sex: row.get(2)?,
            ..User::default()
        })
    }

    let mut rows = db.query(ctx, QUERY, &[]).await?;
    let cancel = ctx.child_token();
    let token = cancel.clone();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                next = rows.next() => next,
            };
            let item = match next {
                Ok(Some(row)) => read_row(&row),
                Ok(None) => break,
                Err(err) => Err(err),
            };
            let failed = item.is_err();
            if token.is_cancelled() || tx.send(item).is_err() || failed {
                break;
            }
        }
        drop(rows);
        drop(tx);
    });
    Ok((rx, cancel))
}
