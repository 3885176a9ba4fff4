pub(crate) mod common;



#[cfg(test)]
mod test_damage;


#[cfg(test)]
mod test_status_battle;


#[cfg(test)]
mod test_items;
