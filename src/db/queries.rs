use rusqlite::{params, Connection};

use crate::models::Booking;

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, name, contact, date, time, guests, hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            booking.id,
            booking.name,
            booking.contact,
            booking.date,
            booking.time,
            booking.guests,
            booking.hours,
        ],
    )?;
    Ok(())
}

/// Newest-first page of bookings, reverse insertion order.
pub fn list_bookings(conn: &Connection, limit: i64, offset: i64) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, contact, date, time, guests, hours
         FROM bookings ORDER BY rowid DESC LIMIT ?1 OFFSET ?2",
    )?;

    let rows = stmt.query_map(params![limit, offset], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(count)
}

pub fn bookings_for_date(conn: &Connection, date: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, contact, date, time, guests, hours
         FROM bookings WHERE date = ?1",
    )?;

    let rows = stmt.query_map(params![date], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

/// Returns whether a row was actually removed. Callers treat a miss as
/// success anyway (delete is idempotent).
pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        guests: row.get(5)?,
        hours: row.get(6)?,
    })
}
